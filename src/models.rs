use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One validated SGPA row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub subject: Option<String>,
    pub grade: String,
    pub credits: f64,
}

/// One half of a CGPA update: past cumulative or current term performance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub score: f64,
    pub credits: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSlot {
    Past,
    Current,
}

impl fmt::Display for TermSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermSlot::Past => write!(f, "past"),
            TermSlot::Current => write!(f, "current"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcKind {
    Sgpa,
    Cgpa,
}

impl fmt::Display for CalcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcKind::Sgpa => write!(f, "SGPA"),
            CalcKind::Cgpa => write!(f, "CGPA"),
        }
    }
}

/// A computed score. `value` keeps full precision so it can feed later
/// calculations; presentation goes through [`ComputationResult::rounded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub id: Uuid,
    pub kind: CalcKind,
    pub value: f64,
    pub total_credits: f64,
    pub computed_at: DateTime<Utc>,
}

pub const DISPLAY_DECIMALS: usize = 3;

impl ComputationResult {
    pub fn new(kind: CalcKind, value: f64, total_credits: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            value,
            total_credits,
            computed_at: Utc::now(),
        }
    }

    pub fn rounded(&self) -> f64 {
        (self.value * 1000.0).round() / 1000.0
    }

    pub fn display_value(&self) -> String {
        format!("{:.*}", DISPLAY_DECIMALS, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeMix {
    pub grade: String,
    pub count: usize,
    pub credits: f64,
}
