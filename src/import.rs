use std::path::Path;

use anyhow::Context;

use crate::validate::RawSubject;

/// Reads subject rows from a CSV with `grade` and `credits` columns and an
/// optional `subject` column. Values are returned unvalidated.
pub fn read_subjects(csv_path: &Path) -> anyhow::Result<Vec<RawSubject>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<RawSubject>().enumerate() {
        let row = result.with_context(|| format!("malformed CSV record {}", index + 1))?;
        rows.push(row);
    }

    tracing::debug!(path = %csv_path.display(), rows = rows.len(), "subjects imported");
    Ok(rows)
}
