//! HTML report generator.
//!
//! Produces a self-contained HTML results page with all CSS inlined and an
//! SVG bar chart of the per-category scores.

use anyhow::{Context, Result};
use std::path::Path;

use misassess_core::model::QuestionBank;
use misassess_core::report::AssessmentReport;
use misassess_core::scoring::ChartRow;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML results page from a report.
///
/// `bank` supplies question and option text for the detailed review; rows
/// whose question is missing from it show only labels.
pub fn generate_html(report: &AssessmentReport, bank: &QuestionBank) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} — {}</title>\n",
        html_escape(&report.bank.title),
        html_escape(&report.respondent.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Assessment Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Candidate: <strong>{}</strong> | {} | {}</p>\n",
        html_escape(&report.respondent.name),
        html_escape(&report.respondent.email),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p class=\"score\"><span class=\"pct\">{}%</span> <span class=\"count\">{}/{} correct</span></p>\n",
        report.score_percentage, report.score.total_score, report.score.total_questions
    ));
    html.push_str("</header>\n");

    // Chart and evaluation
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Performance by Category</h2>\n");
    let chart = report.score.chart_data();
    if !chart.is_empty() {
        html.push_str(&generate_bar_chart(&chart));
    }
    html.push_str("<h2>Expert Evaluation</h2>\n");
    html.push_str("<p class=\"meta\">Rule-based evaluation.</p>\n");
    html.push_str(&format!(
        "<pre class=\"evaluation\">{}</pre>\n",
        html_escape(&report.evaluation)
    ));
    html.push_str("</section>\n");

    // Detailed review
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Detailed Review</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>#</th><th>Category</th><th>Question</th><th>Your Answer</th><th>Correct Answer</th><th>Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for (idx, row) in report.review.iter().enumerate() {
        let question = bank.question(row.question_id);
        let option_text = |label: &str| -> String {
            match question.and_then(|q| q.option(label)) {
                Some(opt) => format!("{}. {}", html_escape(label), html_escape(&opt.text)),
                None => html_escape(label),
            }
        };
        let (class, status) = if row.is_correct {
            ("pass", "Correct")
        } else {
            ("fail", "Incorrect")
        };
        let selected = row
            .selected
            .as_deref()
            .map(option_text)
            .unwrap_or_else(|| "-".to_string());

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            idx + 1,
            html_escape(row.category.short_name()),
            question.map(|q| html_escape(&q.text)).unwrap_or_default(),
            selected,
            option_text(&row.correct_answer),
            status,
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, bank: &QuestionBank, path: &Path) -> Result<()> {
    let html = generate_html(report, bank);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(rows: &[ChartRow]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 220;

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, row) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = row.score as usize * max_width / 100;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&row.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#3b82f6\" rx=\"4\"><title>{}</title></rect>\n",
            label_width, y, width, bar_height, html_escape(&row.label)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            row.score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #0f172a; --border: #e2e8f0; --pass: #dcfce7; --fail: #fde2e2; --accent: #2563eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --accent: #60a5fa; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #64748b; }
.score .pct { font-size: 2.5rem; font-weight: 800; color: var(--accent); }
.score .count { font-size: 1.25rem; margin-left: 1rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre.evaluation { white-space: pre-wrap; padding: 1rem; background: var(--border); border-radius: 8px; line-height: 1.5; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use misassess_core::model::{AnswerMap, Respondent};

    fn make_test_report(answers: &AnswerMap) -> (AssessmentReport, &'static QuestionBank) {
        let bank = QuestionBank::builtin().unwrap();
        let respondent = Respondent::new("Jane <Doe>", "jane@example.com").unwrap();
        (AssessmentReport::generate(bank, &respondent, answers), bank)
    }

    #[test]
    fn html_report_contains_required_elements() {
        let answers: AnswerMap = [(1, "B".to_string()), (2, "A".to_string())]
            .into_iter()
            .collect();
        let (report, bank) = make_test_report(&answers);
        let html = generate_html(&report, bank);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Jane &lt;Doe&gt;"));
        assert!(!html.contains("Jane <Doe>"));
        assert!(html.contains("Systems Thinking"));
        assert!(html.contains("Detailed Review"));
        assert!(html.contains("<svg"));
        // Two of three Systems Thinking questions are unanswered or wrong.
        assert!(html.contains(">33%</text>"));
        assert!(html.contains("B. A flow-control system"));
    }

    #[test]
    fn chart_has_one_bar_per_category() {
        let (report, bank) = make_test_report(&AnswerMap::new());
        let html = generate_html(&report, bank);
        assert_eq!(html.matches("<rect ").count(), 5);
        assert_eq!(html.matches("<tr class=\"fail\">").count(), 24);
    }

    #[test]
    fn html_report_write_to_file() {
        let (report, bank) = make_test_report(&AnswerMap::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.html");

        write_html_report(&report, bank, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
