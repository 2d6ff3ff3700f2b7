use tracing::debug;

use crate::error::{CalcResult, ComputationError, ValidationError};
use crate::grades::GradeScale;
use crate::models::{CalcKind, ComputationResult, SubjectEntry, TermRecord, TermSlot};
use crate::validate::{self, RawSubject};

/// Credit-weighted mean of `(points, credits)` pairs.
///
/// When every pair carries the same points the result is exactly those
/// points rather than a quotient that may drift in the last bit.
pub fn weighted_mean<I>(pairs: I) -> Result<f64, ComputationError>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut weighted = 0.0;
    let mut total = 0.0;
    let mut uniform: Option<f64> = None;
    let mut mixed = false;

    for (points, credits) in pairs {
        weighted += points * credits;
        total += credits;
        match uniform {
            None => uniform = Some(points),
            Some(first) if first != points => mixed = true,
            Some(_) => {}
        }
    }

    if total == 0.0 {
        return Err(ComputationError::ZeroTotalCredits);
    }

    let mean = match uniform {
        Some(points) if !mixed => points,
        _ => weighted / total,
    };

    if !mean.is_finite() {
        return Err(ComputationError::NonFinite(mean));
    }
    Ok(mean)
}

pub fn sgpa(scale: &GradeScale, entries: &[SubjectEntry]) -> CalcResult<ComputationResult> {
    if entries.is_empty() {
        return Err(ValidationError::NoSubjects.into());
    }

    let mut pairs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let row = index + 1;
        let points = scale
            .points(&entry.grade)
            .ok_or_else(|| ValidationError::UnknownGrade {
                row,
                grade: entry.grade.clone(),
            })?;
        if !entry.credits.is_finite() {
            return Err(ValidationError::InvalidCredits {
                row,
                value: entry.credits.to_string(),
            }
            .into());
        }
        if entry.credits <= 0.0 {
            return Err(ValidationError::NonPositiveCredits {
                row,
                value: entry.credits,
            }
            .into());
        }
        pairs.push((points, entry.credits));
    }

    let total_credits: f64 = pairs.iter().map(|(_, credits)| credits).sum();
    let value = weighted_mean(pairs)?;
    let result = ComputationResult::new(CalcKind::Sgpa, value, total_credits);
    debug!(
        result_id = %result.id,
        subjects = entries.len(),
        total_credits,
        score = value,
        "sgpa computed"
    );
    Ok(result)
}

/// Validates raw rows and computes the SGPA in one step.
pub fn sgpa_from_raw(scale: &GradeScale, rows: &[RawSubject]) -> CalcResult<ComputationResult> {
    let entries = validate::parse_subjects(scale, rows)?;
    sgpa(scale, &entries)
}

pub fn cgpa(past: &TermRecord, current: &TermRecord) -> CalcResult<ComputationResult> {
    validate::check_term(TermSlot::Past, past)?;
    validate::check_term(TermSlot::Current, current)?;

    let value = weighted_mean([(past.score, past.credits), (current.score, current.credits)])?;
    let total_credits = past.credits + current.credits;
    let result = ComputationResult::new(CalcKind::Cgpa, value, total_credits);
    debug!(
        result_id = %result.id,
        total_credits,
        score = value,
        "cgpa computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    const TOLERANCE: f64 = 1e-9;

    fn entry(grade: &str, credits: f64) -> SubjectEntry {
        SubjectEntry {
            subject: None,
            grade: grade.to_string(),
            credits,
        }
    }

    #[test]
    fn sgpa_matches_worked_example() {
        let scale = GradeScale::standard().unwrap();
        let entries = vec![entry("O", 3.0), entry("A", 4.0), entry("B+", 2.0)];
        let result = sgpa(&scale, &entries).unwrap();
        assert!((result.value - 76.0 / 9.0).abs() < TOLERANCE);
        assert_eq!(result.display_value(), "8.444");
        assert_eq!(result.total_credits, 9.0);
        assert_eq!(result.kind, CalcKind::Sgpa);
    }

    #[test]
    fn sgpa_equals_weighted_formula() {
        let scale = GradeScale::standard().unwrap();
        let entries = vec![
            entry("A+", 4.0),
            entry("C", 3.0),
            entry("F", 1.5),
            entry("B", 2.0),
            entry("O", 0.5),
        ];
        let weighted: f64 = entries
            .iter()
            .map(|e| scale.points(&e.grade).unwrap() * e.credits)
            .sum();
        let total: f64 = entries.iter().map(|e| e.credits).sum();
        let result = sgpa(&scale, &entries).unwrap();
        assert!((result.value - weighted / total).abs() < TOLERANCE);
    }

    #[test]
    fn single_entry_yields_grade_points_exactly() {
        let scale = GradeScale::standard().unwrap();
        for credits in [0.1, 1.0, 3.0, 7.3, 1e6] {
            let result = sgpa(&scale, &[entry("C", credits)]).unwrap();
            assert_eq!(result.value, 5.5);
        }
    }

    #[test]
    fn identical_inputs_give_identical_values() {
        let scale = GradeScale::standard().unwrap();
        let entries = vec![entry("A", 4.0), entry("B+", 3.0)];
        let first = sgpa(&scale, &entries).unwrap();
        let second = sgpa(&scale, &entries).unwrap();
        assert_eq!(first.value, second.value);
    }

    #[test]
    fn sgpa_rejects_unknown_grade_without_output() {
        let scale = GradeScale::standard().unwrap();
        let err = sgpa(&scale, &[entry("O", 3.0), entry("S", 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::UnknownGrade { row: 2, .. })
        ));
    }

    #[test]
    fn sgpa_rejects_non_positive_credits() {
        let scale = GradeScale::standard().unwrap();
        let err = sgpa(&scale, &[entry("O", 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::NonPositiveCredits { .. })
        ));
        let err = sgpa(&scale, &[entry("O", f64::NAN)]).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::InvalidCredits { .. })
        ));
    }

    #[test]
    fn sgpa_from_raw_validates_first() {
        let scale = GradeScale::standard().unwrap();
        let rows = vec![RawSubject::new("O", "3"), RawSubject::new("A", "four")];
        let err = sgpa_from_raw(&scale, &rows).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::InvalidCredits { row: 2, .. })
        ));

        let rows = vec![RawSubject::new("O", "3"), RawSubject::new("A", "4")];
        let result = sgpa_from_raw(&scale, &rows).unwrap();
        assert!((result.value - 62.0 / 7.0).abs() < TOLERANCE);
    }

    #[test]
    fn zero_total_is_a_computation_error() {
        assert_eq!(
            weighted_mean(Vec::<(f64, f64)>::new()).unwrap_err(),
            ComputationError::ZeroTotalCredits
        );
        assert_eq!(
            weighted_mean([(8.0, 2.0), (6.0, -2.0)]).unwrap_err(),
            ComputationError::ZeroTotalCredits
        );
    }

    #[test]
    fn overflowing_mean_is_a_computation_error() {
        let err = weighted_mean([(10.0, f64::MAX), (0.0, f64::MAX)]).unwrap_err();
        assert!(matches!(err, ComputationError::NonFinite(_)));
    }

    #[test]
    fn cgpa_matches_worked_example() {
        let past = TermRecord {
            score: 8.5,
            credits: 60.0,
        };
        let current = TermRecord {
            score: 9.2,
            credits: 20.0,
        };
        let result = cgpa(&past, &current).unwrap();
        assert!((result.value - 8.675).abs() < TOLERANCE);
        assert_eq!(result.display_value(), "8.675");
        assert_eq!(result.total_credits, 80.0);
        assert_eq!(result.kind, CalcKind::Cgpa);
    }

    #[test]
    fn cgpa_equals_two_term_formula() {
        let cases = [(7.25, 44.0, 9.9, 21.5), (0.0, 10.0, 10.0, 30.0), (6.1, 0.5, 6.2, 99.0)];
        for (s1, c1, s2, c2) in cases {
            let result = cgpa(
                &TermRecord {
                    score: s1,
                    credits: c1,
                },
                &TermRecord {
                    score: s2,
                    credits: c2,
                },
            )
            .unwrap();
            let expected = (s1 * c1 + s2 * c2) / (c1 + c2);
            assert!((result.value - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn cgpa_rejects_out_of_range_scores() {
        let good = TermRecord {
            score: 8.0,
            credits: 20.0,
        };
        let high = TermRecord {
            score: 10.01,
            credits: 20.0,
        };
        let low = TermRecord {
            score: -1.0,
            credits: 20.0,
        };

        let err = cgpa(&high, &good).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::ScoreOutOfRange {
                slot: TermSlot::Past,
                ..
            })
        ));
        let err = cgpa(&good, &low).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Validation(ValidationError::ScoreOutOfRange {
                slot: TermSlot::Current,
                ..
            })
        ));
    }

    #[test]
    fn cgpa_rejects_non_positive_credits() {
        let good = TermRecord {
            score: 8.0,
            credits: 20.0,
        };
        let empty = TermRecord {
            score: 8.0,
            credits: 0.0,
        };
        let err = cgpa(&good, &empty).unwrap_err();
        assert!(err.to_string().contains("current credits must be positive"));
    }

    #[test]
    fn sgpa_result_feeds_cgpa() {
        let scale = GradeScale::standard().unwrap();
        let term = sgpa(&scale, &[entry("O", 3.0), entry("A", 4.0), entry("B+", 2.0)]).unwrap();
        let past = TermRecord {
            score: 8.0,
            credits: 9.0,
        };
        let current = TermRecord {
            score: term.value,
            credits: term.total_credits,
        };
        let result = cgpa(&past, &current).unwrap();
        let expected = (8.0 * 9.0 + 76.0) / 18.0;
        assert!((result.value - expected).abs() < TOLERANCE);
    }
}
