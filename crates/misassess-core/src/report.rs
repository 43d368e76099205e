//! Assessment report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::breakdown::{build_breakdown, CategoryBreakdown};
use crate::evaluation::{Evaluation, FitLevel, Recommendation};
use crate::model::{AnswerMap, BankSummary, QuestionBank, Respondent};
use crate::scoring::{compute_score, review, QuestionReview, ScoreResult};

/// A complete scored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Who took the assessment.
    pub respondent: Respondent,
    /// Summary of the question bank.
    pub bank: BankSummary,
    /// The frozen answers.
    pub answers: AnswerMap,
    /// Raw scoring output.
    pub score: ScoreResult,
    /// Per-category breakdown, in bank order.
    pub breakdown: Vec<CategoryBreakdown>,
    /// Overall percentage.
    pub score_percentage: u32,
    pub level: FitLevel,
    pub recommendation: Recommendation,
    /// Rendered evaluation text.
    pub evaluation: String,
    /// Per-question review rows.
    pub review: Vec<QuestionReview>,
}

impl AssessmentReport {
    /// Score `answers` against `bank` and build the full report.
    pub fn generate(bank: &QuestionBank, respondent: &Respondent, answers: &AnswerMap) -> Self {
        Self::generate_at(bank, respondent, answers, Utc::now())
    }

    /// Like [`AssessmentReport::generate`] with an explicit creation time.
    pub fn generate_at(
        bank: &QuestionBank,
        respondent: &Respondent,
        answers: &AnswerMap,
        created_at: DateTime<Utc>,
    ) -> Self {
        let score = compute_score(&bank.questions, answers);
        let breakdown = build_breakdown(&score.category_scores);
        let score_percentage = score.score_percentage();
        let evaluation =
            Evaluation::build(&respondent.name, &bank.domain, score_percentage, &breakdown);

        Self {
            id: Uuid::new_v4(),
            created_at,
            respondent: respondent.clone(),
            bank: bank.summary(),
            answers: answers.clone(),
            review: review(&bank.questions, answers),
            score,
            breakdown,
            score_percentage,
            level: evaluation.level,
            recommendation: evaluation.recommendation,
            evaluation: evaluation.to_string(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn respondent() -> Respondent {
        Respondent::new("Jane Doe", "jane@example.com").unwrap()
    }

    #[test]
    fn all_correct_report() {
        let bank = QuestionBank::builtin().unwrap();
        let answers: AnswerMap = bank
            .questions
            .iter()
            .map(|q| (q.id, q.correct_answer.clone()))
            .collect();
        let report = AssessmentReport::generate(bank, &respondent(), &answers);

        assert_eq!(report.score.total_score, 24);
        assert_eq!(report.score_percentage, 100);
        assert_eq!(report.level, FitLevel::Strong);
        assert_eq!(report.recommendation, Recommendation::Hire);
        assert_eq!(report.breakdown.len(), 5);
        assert!(report.breakdown.iter().all(|b| b.percent == 100));
        assert!(report.review.iter().all(|r| r.is_correct));
        assert!(report
            .evaluation
            .starts_with("Jane Doe: Strong fit for MIS Systems + Automation. Overall score 100%."));
    }

    #[test]
    fn empty_answers_report() {
        let bank = QuestionBank::builtin().unwrap();
        let report = AssessmentReport::generate(bank, &respondent(), &AnswerMap::new());

        assert_eq!(report.score.total_score, 0);
        assert!(report.breakdown.iter().all(|b| b.percent == 0));
        assert_eq!(report.level, FitLevel::NotReady);
        assert_eq!(report.recommendation, Recommendation::TrainFurther);
        // Every category ties at 0%, so the first two in bank order are the gaps.
        assert!(report.evaluation.contains(
            "• Systems Thinking: Practice defining a clean data model: unique IDs, statuses, SLA, exception queues.\n\
             • Advanced Google Sheets: Optimize for scale: bounded ranges, helper columns, avoid giant nested formulas."
        ));
        assert_eq!(
            report.breakdown[0].full_name,
            Category::SystemsThinking.full_name()
        );
    }

    #[test]
    fn json_roundtrip() {
        let bank = QuestionBank::builtin().unwrap();
        let answers: AnswerMap = [(1, "B".to_string()), (13, "A".to_string())]
            .into_iter()
            .collect();
        let report = AssessmentReport::generate(bank, &respondent(), &answers);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.save_json(&path).unwrap();
        let loaded = AssessmentReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.answers, answers);
        assert_eq!(loaded.score, report.score);
        assert_eq!(loaded.level, report.level);
        assert_eq!(loaded.evaluation, report.evaluation);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AssessmentReport::load_json(&dir.path().join("nope.json")).is_err());
    }
}
