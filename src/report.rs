use std::fmt::Write;

use crate::models::{GradeMix, SubjectEntry};
use crate::session::ScoreCard;

pub fn summarize_by_grade(entries: &[SubjectEntry]) -> Vec<GradeMix> {
    let mut summaries: Vec<GradeMix> = Vec::new();

    for entry in entries {
        match summaries.iter_mut().find(|mix| mix.grade == entry.grade) {
            Some(mix) => {
                mix.count += 1;
                mix.credits += entry.credits;
            }
            None => summaries.push(GradeMix {
                grade: entry.grade.clone(),
                count: 1,
                credits: entry.credits,
            }),
        }
    }

    summaries.sort_by(|a, b| {
        b.credits
            .partial_cmp(&a.credits)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}

pub fn build_report(entries: &[SubjectEntry], card: &ScoreCard) -> String {
    let summaries = summarize_by_grade(entries);
    let result = &card.result;

    let mut output = String::new();

    let _ = writeln!(output, "# {} Report", result.kind);
    let _ = writeln!(
        output,
        "Generated {} across {} subjects ({} credits)",
        result.computed_at.format("%Y-%m-%d %H:%M UTC"),
        entries.len(),
        result.total_credits
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Result");
    let _ = writeln!(output, "**{}: {}**", result.kind, result.display_value());

    if let Some(tier) = card.tier {
        let _ = writeln!(output);
        let _ = writeln!(output, "_{}_: {}", tier.title(), tier.blurb());
    }
    if let Some(message) = &card.motivation {
        let _ = writeln!(output);
        let _ = writeln!(output, "> {message}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No subjects recorded.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} subjects, {} credits",
                summary.grade, summary.count, summary.credits
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subjects");

    for (index, entry) in entries.iter().enumerate() {
        let name = entry
            .subject
            .clone()
            .unwrap_or_else(|| format!("Subject {}", index + 1));
        let _ = writeln!(
            output,
            "- {} grade {} ({} credits)",
            name, entry.grade, entry.credits
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc;
    use crate::grades::GradeScale;

    fn entry(subject: Option<&str>, grade: &str, credits: f64) -> SubjectEntry {
        SubjectEntry {
            subject: subject.map(str::to_string),
            grade: grade.to_string(),
            credits,
        }
    }

    #[test]
    fn grade_mix_groups_and_sorts_by_credits() {
        let entries = vec![
            entry(None, "A", 2.0),
            entry(None, "O", 3.0),
            entry(None, "A", 4.0),
        ];
        let mix = summarize_by_grade(&entries);
        assert_eq!(mix.len(), 2);
        assert_eq!(mix[0].grade, "A");
        assert_eq!(mix[0].count, 2);
        assert_eq!(mix[0].credits, 6.0);
        assert_eq!(mix[1].grade, "O");
    }

    #[test]
    fn report_lists_result_tier_and_subjects() {
        let entries = vec![
            entry(Some("Maths"), "O", 3.0),
            entry(None, "A", 4.0),
            entry(None, "B+", 2.0),
        ];
        let result = calc::sgpa(&GradeScale::standard().unwrap(), &entries).unwrap();
        let mut card = ScoreCard::new(result);
        card.motivation = Some("Keep climbing.".to_string());

        let report = build_report(&entries, &card);
        assert!(report.starts_with("# SGPA Report"));
        assert!(report.contains("**SGPA: 8.444**"));
        assert!(report.contains("Grade Gladiator"));
        assert!(report.contains("> Keep climbing."));
        assert!(report.contains("- Maths grade O (3 credits)"));
        assert!(report.contains("- Subject 2 grade A (4 credits)"));
    }

    #[test]
    fn report_omits_missing_motivation() {
        let entries = vec![entry(None, "F", 3.0)];
        let result = calc::sgpa(&GradeScale::standard().unwrap(), &entries).unwrap();
        let report = build_report(&entries, &ScoreCard::new(result));
        assert!(!report.contains("> "));
        assert!(report.contains("**SGPA: 0.000**"));
    }
}
