use std::sync::Arc;

use crate::error::ValidationError;

pub const MAX_POINTS: f64 = 10.0;

const STANDARD_SCALE: [(&str, f64); 11] = [
    ("O", 10.0),
    ("A+", 9.0),
    ("A", 8.0),
    ("B+", 7.0),
    ("B", 6.0),
    ("C", 5.5),
    ("W", 0.0),
    ("F", 0.0),
    ("Ab", 0.0),
    ("I", 0.0),
    ("*", 0.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct GradePoint {
    pub label: String,
    pub points: f64,
}

/// Ordered grade label to point table. Labels are matched exactly, so `A`
/// and `Ab` stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    entries: Vec<GradePoint>,
}

impl GradeScale {
    pub fn new<I, S>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut scale: Vec<GradePoint> = Vec::new();

        for (label, points) in entries {
            let label = label.into();
            if !(0.0..=MAX_POINTS).contains(&points) {
                return Err(ValidationError::GradePointsOutOfRange { label, points });
            }
            if scale.iter().any(|entry| entry.label == label) {
                return Err(ValidationError::DuplicateGrade { label });
            }
            scale.push(GradePoint { label, points });
        }

        Ok(Self { entries: scale })
    }

    /// The fixed table every calculator shares. Built once at start-up.
    pub fn standard() -> Result<Arc<Self>, ValidationError> {
        Self::new(STANDARD_SCALE).map(Arc::new)
    }

    pub fn points(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.points)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.points(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradePoint> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
