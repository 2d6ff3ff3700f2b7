use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

use crate::session::{ScoreCard, Session};

/// Second line of `--json` output, written once a message lands.
#[derive(Debug, Serialize)]
struct MotivationLine<'a> {
    id: Uuid,
    motivation: &'a str,
}

pub async fn settle(pending: Option<JoinHandle<bool>>) {
    if let Some(handle) = pending {
        if let Err(err) = handle.await {
            warn!(error = %err, "motivation task did not complete");
        }
    }
}

/// Writes the score, then waits on the enrichment and writes the message if
/// one landed. JSON mode emits one object per line.
pub async fn present<W: Write>(
    session: &Session,
    pending: Option<JoinHandle<bool>>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let card = session.current().context("no result to show")?;
    if json {
        writeln!(out, "{}", serde_json::to_string(&card)?)?;
    } else {
        write_score(out, &card)?;
    }
    out.flush()?;

    settle(pending).await;

    let Some(latest) = session.current() else {
        return Ok(());
    };
    if latest.result.id != card.result.id {
        return Ok(());
    }
    if let Some(message) = latest.motivation.as_deref() {
        if json {
            let line = MotivationLine {
                id: latest.result.id,
                motivation: message,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            writeln!(out)?;
            writeln!(out, "{message}")?;
        }
        out.flush()?;
    }
    Ok(())
}

fn write_score<W: Write>(out: &mut W, card: &ScoreCard) -> std::io::Result<()> {
    writeln!(
        out,
        "Your {} is {}",
        card.result.kind,
        card.result.display_value()
    )?;
    if let Some(tier) = card.tier {
        writeln!(out, "{}: {}", tier.title(), tier.blurb())?;
    }
    Ok(())
}
