//! CSV export of the ranking table.

use anyhow::Context;

use crate::errors::AppError;
use crate::screening::scoring::ScoreRow;

pub const REPORT_FILE_NAME: &str = "resume_ranking_report.csv";

const HEADER: [&str; 7] = [
    "rank",
    "name",
    "match_score",
    "similarity",
    "skill_coverage",
    "matched_skills",
    "missing_skills",
];

/// Renders rows as CSV. The header is written even when there are no rows.
pub fn render_csv(rows: &[ScoreRow]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER).context("Failed to write CSV header")?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row for '{}'", row.name))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV report: {e}"))?;
    Ok(String::from_utf8(bytes).context("CSV report is not valid UTF-8")?)
}
