pub mod init;
pub mod score;
pub mod take;
pub mod validate;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};

use misassess_core::bank::load_question_bank;
use misassess_core::config::AssessConfig;
use misassess_core::model::QuestionBank;
use misassess_core::report::AssessmentReport;
use misassess_report::html::write_html_report;

/// Pick the question bank: `--bank`, then the configured bank, then the built-in one.
pub fn resolve_bank(
    path: Option<&Path>,
    config: &AssessConfig,
) -> Result<Cow<'static, QuestionBank>> {
    match path.or(config.question_bank.as_deref()) {
        Some(path) => {
            let bank = load_question_bank(path)
                .with_context(|| format!("failed to load question bank {}", path.display()))?;
            tracing::debug!(bank = %bank.id, questions = bank.len(), "loaded question bank");
            Ok(Cow::Owned(bank))
        }
        None => Ok(Cow::Borrowed(
            QuestionBank::builtin().context("built-in question bank is invalid")?,
        )),
    }
}

/// Per-category table, in bank order.
pub fn breakdown_table(report: &AssessmentReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Correct", "Total", "Score"]);
    for row in &report.breakdown {
        table.add_row(vec![
            Cell::new(&row.short_name),
            Cell::new(row.correct),
            Cell::new(row.total),
            Cell::new(format!("{}%", row.percent)),
        ]);
    }
    table
}

fn timestamp_slug(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H%M%S").to_string()
}

/// Write the JSON report into `dir`, named after the report's creation time.
pub fn save_json_report(report: &AssessmentReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("report-{}.json", timestamp_slug(report.created_at)));
    report.save_json(&path)?;
    tracing::info!("JSON report written to {}", path.display());
    Ok(path)
}

/// Write the HTML results page into `dir`, named after the report's creation time.
pub fn save_html_report(
    report: &AssessmentReport,
    bank: &QuestionBank,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(format!("report-{}.html", timestamp_slug(report.created_at)));
    write_html_report(report, bank, &path)?;
    tracing::info!("HTML report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_is_borrowed_by_default() {
        let bank = resolve_bank(None, &AssessConfig::default()).unwrap();
        assert!(matches!(bank, Cow::Borrowed(_)));
        assert_eq!(bank.len(), 24);
    }

    #[test]
    fn explicit_bank_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(&path, misassess_core::bank::builtin_source()).unwrap();
        let bank = resolve_bank(Some(&path), &AssessConfig::default()).unwrap();
        assert!(matches!(bank, Cow::Owned(_)));
        assert_eq!(bank.id, "mis-executive");
    }

    #[test]
    fn missing_bank_file_is_an_error() {
        let config = AssessConfig {
            question_bank: Some(PathBuf::from("/nonexistent/bank.toml")),
            ..Default::default()
        };
        let err = resolve_bank(None, &config).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load question bank"));
    }

    #[test]
    fn report_files_are_named_by_timestamp() {
        use chrono::TimeZone;
        use misassess_core::model::{AnswerMap, Respondent};

        let bank = QuestionBank::builtin().unwrap();
        let respondent = Respondent::new("Jane Doe", "jane@example.com").unwrap();
        let created = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 5).unwrap();
        let report = AssessmentReport::generate_at(bank, &respondent, &AnswerMap::new(), created);

        let dir = tempfile::tempdir().unwrap();
        let json = save_json_report(&report, dir.path()).unwrap();
        let html = save_html_report(&report, bank, dir.path()).unwrap();
        assert!(json.ends_with("report-2026-10-17T093005.json"));
        assert!(html.ends_with("report-2026-10-17T093005.html"));
        assert!(html.exists());
    }
}
