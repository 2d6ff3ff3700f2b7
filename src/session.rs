use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::models::ComputationResult;
use crate::motivation::{fetch_motivation, MotivationSource};
use crate::tier::Tier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub result: ComputationResult,
    pub rounded: f64,
    pub tier: Option<Tier>,
    pub motivation: Option<String>,
}

impl ScoreCard {
    pub fn new(result: ComputationResult) -> Self {
        ScoreCard {
            rounded: result.rounded(),
            tier: Tier::for_score(result.value),
            result,
            motivation: None,
        }
    }
}

#[derive(Default)]
struct SessionState {
    current: Option<ScoreCard>,
}

#[derive(Clone)]
pub struct Session {
    source: Option<Arc<dyn MotivationSource>>,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new(source: Arc<dyn MotivationSource>) -> Self {
        Session {
            source: Some(source),
            state: Arc::default(),
        }
    }

    pub fn offline() -> Self {
        Session {
            source: None,
            state: Arc::default(),
        }
    }

    /// The handle resolves to whether the message landed. A reply only
    /// lands if its result is still current.
    pub fn submit(&self, result: ComputationResult) -> Option<JoinHandle<bool>> {
        let id = result.id;
        let score = result.value;
        lock(&self.state).current = Some(ScoreCard::new(result));

        let source = self.source.clone()?;
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let message = fetch_motivation(source.as_ref(), score).await;
            attach(&state, id, message)
        }))
    }

    pub fn current(&self) -> Option<ScoreCard> {
        lock(&self.state).current.clone()
    }
}

fn attach(state: &Mutex<SessionState>, id: Uuid, message: Option<String>) -> bool {
    let Some(message) = message else {
        return false;
    };

    let mut guard = lock(state);
    match guard.current.as_mut() {
        Some(card) if card.result.id == id => {
            card.motivation = Some(message);
            true
        }
        _ => {
            debug!(result_id = %id, "discarding motivation for superseded result");
            false
        }
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
