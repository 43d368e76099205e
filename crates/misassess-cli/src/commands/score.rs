//! The `misassess score` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use misassess_core::answers::{check_answers, load_answers};
use misassess_core::config::load_config_from;
use misassess_core::model::{QuestionBank, Respondent};
use misassess_core::report::AssessmentReport;
use misassess_core::session::Submission;
use misassess_report::{build_summary, write_summary};

use super::{breakdown_table, resolve_bank, save_html_report, save_json_report};

pub fn execute(
    answers_path: PathBuf,
    name: String,
    email: String,
    bank_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let formats = parse_formats(&format)?;
    let config = load_config_from(config_path.as_deref())?;
    let bank = resolve_bank(bank_path.as_deref(), &config)?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let respondent = Respondent::new(name, email).map_err(anyhow::Error::msg)?;
    let answers = load_answers(&answers_path)?;
    for issue in check_answers(&bank, &answers) {
        tracing::warn!("answers file: {issue}");
    }
    let unanswered = bank.len().saturating_sub(
        bank.questions
            .iter()
            .filter(|q| answers.contains(q.id))
            .count(),
    );
    if unanswered > 0 {
        eprintln!("Note: {unanswered} unanswered question(s) count as incorrect.");
    }

    let report = Submission::new(&bank, respondent, answers).score();
    let summary = build_summary(&report, Utc::now());
    println!("{summary}");
    eprintln!("\n{}", breakdown_table(&report));

    for format in formats {
        let path = export(format, &report, &bank, &summary, &output)?;
        eprintln!("{} written to: {}", format.describe(), path.display());
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Html,
}

impl Format {
    fn describe(self) -> &'static str {
        match self {
            Format::Text => "Summary",
            Format::Json => "JSON report",
            Format::Html => "HTML report",
        }
    }
}

/// Comma-separated list of `text`, `json`, `html`, or `all`.
fn parse_formats(list: &str) -> Result<Vec<Format>> {
    let mut formats = Vec::new();
    for name in list.split(',').map(str::trim) {
        let parsed: &[Format] = match name {
            "text" => &[Format::Text],
            "json" => &[Format::Json],
            "html" => &[Format::Html],
            "all" => &[Format::Text, Format::Json, Format::Html],
            other => anyhow::bail!("unknown format: '{other}' (expected text, json, html, or all)"),
        };
        for format in parsed {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
    }
    Ok(formats)
}

fn export(
    format: Format,
    report: &AssessmentReport,
    bank: &QuestionBank,
    summary: &str,
    output: &Path,
) -> Result<PathBuf> {
    match format {
        Format::Text => write_summary(output, summary),
        Format::Json => save_json_report(report, output),
        Format::Html => save_html_report(report, bank, output),
    }
}
