//! Scoring engine.
//!
//! Reduces a question bank and a respondent's answers into per-category
//! statistics and an overall score.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Category, Question, QuestionId};

/// Correct and total counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub correct: u32,
    pub total: u32,
}

impl CategoryStats {
    /// `round(correct / total * 100)`, or 0 when `total` is 0.
    pub fn percent(&self) -> u32 {
        percent(self.correct, self.total)
    }
}

/// Round-half-up percentage of `part` over `whole`; 0 when `whole` is 0.
///
/// Computed in integers so 1/3 is 33, 2/3 is 67 and 1/8 is 13.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Result of scoring one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Number of correctly answered questions.
    pub total_score: u32,
    /// Number of questions in the bank.
    pub total_questions: u32,
    /// Per-category statistics, in first-appearance order of the bank.
    pub category_scores: IndexMap<Category, CategoryStats>,
}

impl ScoreResult {
    /// Overall percentage, rounded.
    pub fn score_percentage(&self) -> u32 {
        percent(self.total_score, self.total_questions)
    }

    /// Chart rows, one per category in first-appearance order.
    pub fn chart_data(&self) -> Vec<ChartRow> {
        self.category_scores
            .iter()
            .map(|(category, stats)| ChartRow {
                name: category.short_name().to_string(),
                score: stats.percent(),
                label: format!("{}/{}", stats.correct, stats.total),
            })
            .collect()
    }
}

/// One bar of the per-category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Category short name.
    pub name: String,
    /// Category percentage.
    pub score: u32,
    /// `"correct/total"`.
    pub label: String,
}

/// Score a set of answers against the bank's answer key.
///
/// Missing answers count as incorrect. Matching is exact and case-sensitive.
pub fn compute_score(questions: &[Question], answers: &AnswerMap) -> ScoreResult {
    let mut total_score = 0u32;
    let mut category_scores: IndexMap<Category, CategoryStats> = IndexMap::new();

    for q in questions {
        let stats = category_scores.entry(q.category).or_default();
        stats.total += 1;
        if answers.get(q.id).is_some_and(|label| q.is_correct(label)) {
            stats.correct += 1;
            total_score += 1;
        }
    }

    tracing::debug!(
        total_score,
        total_questions = questions.len(),
        answered = answers.len(),
        "scored submission"
    );

    ScoreResult {
        total_score,
        total_questions: questions.len() as u32,
        category_scores,
    }
}

/// Per-question review row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub question_id: QuestionId,
    pub category: Category,
    /// The respondent's selection, if any.
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Build the per-question review list in bank order.
pub fn review(questions: &[Question], answers: &AnswerMap) -> Vec<QuestionReview> {
    questions
        .iter()
        .map(|q| {
            let selected = answers.get(q.id);
            QuestionReview {
                question_id: q.id,
                category: q.category,
                selected: selected.map(str::to_string),
                correct_answer: q.correct_answer.clone(),
                is_correct: selected.is_some_and(|label| q.is_correct(label)),
            }
        })
        .collect()
}
