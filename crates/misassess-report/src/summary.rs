//! Plain-text summary used for clipboard copy and file export.

use chrono::{DateTime, SecondsFormat, Utc};

use misassess_core::breakdown::sorted_by_percent_desc;
use misassess_core::report::AssessmentReport;

/// Build the plain-text summary of a report.
///
/// `generated_at` is stamped into the text; everything else comes from the
/// report. Categories are listed by descending percent.
pub fn build_summary(report: &AssessmentReport, generated_at: DateTime<Utc>) -> String {
    let category_summary = sorted_by_percent_desc(&report.breakdown)
        .iter()
        .map(|c| format!("{}: {}/{} ({}%)", c.short_name, c.correct, c.total, c.percent))
        .collect::<Vec<_>>()
        .join("\n");

    [
        format!("{} — Summary", report.bank.title),
        format!("Candidate: {}", report.respondent.name),
        format!("Email: {}", report.respondent.email),
        format!(
            "Timestamp: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!(
            "Overall: {}/{} ({}%)",
            report.score.total_score, report.score.total_questions, report.score_percentage
        ),
        String::new(),
        "Category Breakdown:".to_string(),
        category_summary,
        String::new(),
        "Evaluation:".to_string(),
        report.evaluation.clone(),
    ]
    .join("\n")
}
