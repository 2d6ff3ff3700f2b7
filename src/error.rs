use crate::models::TermSlot;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one subject is required")]
    NoSubjects,

    #[error("row {row}: grade is missing")]
    MissingGrade { row: usize },

    #[error("row {row}: unknown grade {grade:?}")]
    UnknownGrade { row: usize, grade: String },

    #[error("row {row}: credits are missing")]
    MissingCredits { row: usize },

    #[error("row {row}: credits {value:?} is not a number")]
    InvalidCredits { row: usize, value: String },

    #[error("row {row}: credits must be positive, got {value}")]
    NonPositiveCredits { row: usize, value: f64 },

    #[error("{slot} score {value:?} is not a number")]
    InvalidScore { slot: TermSlot, value: String },

    #[error("{slot} score {value} is out of range [0, 10]")]
    ScoreOutOfRange { slot: TermSlot, value: f64 },

    #[error("{slot} credits {value:?} is not a number")]
    InvalidTermCredits { slot: TermSlot, value: String },

    #[error("{slot} credits must be positive, got {value}")]
    NonPositiveTermCredits { slot: TermSlot, value: f64 },

    #[error("grade {label:?} appears more than once in the scale")]
    DuplicateGrade { label: String },

    #[error("grade {label:?} has points {points} outside [0, 10]")]
    GradePointsOutOfRange { label: String, points: f64 },
}

/// Validation should make these unreachable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    #[error("total credits sum to zero")]
    ZeroTotalCredits,

    #[error("weighted mean is not finite ({0})")]
    NonFinite(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("calculation failed: {0}")]
    Computation(#[from] ComputationError),
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("motivation endpoint is disabled")]
    Disabled,

    #[error("motivation request failed: {0}")]
    Http(String),

    #[error("motivation endpoint returned status {0}")]
    Status(u16),

    #[error("motivation response was malformed: {0}")]
    Malformed(String),

    #[error("motivation response carried no message")]
    EmptyMessage,
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EnrichmentError::Malformed(err.to_string())
        } else {
            EnrichmentError::Http(err.to_string())
        }
    }
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;
