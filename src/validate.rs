use serde::Deserialize;

use crate::error::ValidationError;
use crate::grades::{GradeScale, MAX_POINTS};
use crate::models::{SubjectEntry, TermRecord, TermSlot};

/// A subject row as typed by the user or read from a file, before any
/// checks have run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSubject {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub credits: String,
}

impl RawSubject {
    #[cfg(test)]
    pub fn new(grade: impl Into<String>, credits: impl Into<String>) -> Self {
        Self {
            subject: None,
            grade: grade.into(),
            credits: credits.into(),
        }
    }

    /// Parses the command-line form `[NAME=]GRADE:CREDITS`, e.g. `O:3` or
    /// `Maths=A+:4`. Nothing is checked here; a malformed argument simply
    /// yields empty fields that validation rejects.
    pub fn from_arg(arg: &str) -> Self {
        let (subject, rest) = match arg.split_once('=') {
            Some((name, rest)) => (Some(name.trim().to_string()), rest),
            None => (None, arg),
        };
        let (grade, credits) = rest.rsplit_once(':').unwrap_or((rest, ""));

        Self {
            subject: subject.filter(|name| !name.is_empty()),
            grade: grade.to_string(),
            credits: credits.to_string(),
        }
    }
}

/// Validates every row in order and stops at the first violation. Rows are
/// numbered from 1 in errors.
pub fn parse_subjects(
    scale: &GradeScale,
    rows: &[RawSubject],
) -> Result<Vec<SubjectEntry>, ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::NoSubjects);
    }

    rows.iter()
        .enumerate()
        .map(|(index, raw)| parse_subject(scale, index + 1, raw))
        .collect()
}

fn parse_subject(
    scale: &GradeScale,
    row: usize,
    raw: &RawSubject,
) -> Result<SubjectEntry, ValidationError> {
    let grade = raw.grade.trim();
    if grade.is_empty() {
        return Err(ValidationError::MissingGrade { row });
    }
    if !scale.contains(grade) {
        return Err(ValidationError::UnknownGrade {
            row,
            grade: grade.to_string(),
        });
    }

    let text = raw.credits.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingCredits { row });
    }
    let credits = match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Err(ValidationError::InvalidCredits {
                row,
                value: text.to_string(),
            })
        }
    };
    if credits <= 0.0 {
        return Err(ValidationError::NonPositiveCredits {
            row,
            value: credits,
        });
    }

    Ok(SubjectEntry {
        subject: raw
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        grade: grade.to_string(),
        credits,
    })
}

pub fn parse_term(slot: TermSlot, score: &str, credits: &str) -> Result<TermRecord, ValidationError> {
    let score_text = score.trim();
    let score = match score_text.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Err(ValidationError::InvalidScore {
                slot,
                value: score_text.to_string(),
            })
        }
    };

    let credits_text = credits.trim();
    let credits = match credits_text.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Err(ValidationError::InvalidTermCredits {
                slot,
                value: credits_text.to_string(),
            })
        }
    };

    let record = TermRecord { score, credits };
    check_term(slot, &record)?;
    Ok(record)
}

/// Range checks for an already-typed record.
pub fn check_term(slot: TermSlot, record: &TermRecord) -> Result<(), ValidationError> {
    if !record.score.is_finite() {
        return Err(ValidationError::InvalidScore {
            slot,
            value: record.score.to_string(),
        });
    }
    if !(0.0..=MAX_POINTS).contains(&record.score) {
        return Err(ValidationError::ScoreOutOfRange {
            slot,
            value: record.score,
        });
    }
    if !record.credits.is_finite() {
        return Err(ValidationError::InvalidTermCredits {
            slot,
            value: record.credits.to_string(),
        });
    }
    if record.credits <= 0.0 {
        return Err(ValidationError::NonPositiveTermCredits {
            slot,
            value: record.credits,
        });
    }
    Ok(())
}
