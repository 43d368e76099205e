//! Core data model types for misassess.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent question banks, respondents, and their answers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier of a question within a bank.
pub type QuestionId = u32;

/// The fixed set of assessment categories.
///
/// Each category has a full name, used as the grouping key when scoring, and
/// a short name used for display and coaching lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    SystemsThinking,
    GoogleSheets,
    AppsScript,
    AppSheet,
    Integration,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::SystemsThinking,
        Category::GoogleSheets,
        Category::AppsScript,
        Category::AppSheet,
        Category::Integration,
    ];

    /// The full category name (the grouping key).
    pub fn full_name(&self) -> &'static str {
        match self {
            Category::SystemsThinking => "Systems Thinking (FMS/IMS/PMS)",
            Category::GoogleSheets => "Advanced Google Sheets",
            Category::AppsScript => "Google Apps Script + Web Apps",
            Category::AppSheet => "AppSheet",
            Category::Integration => "Integration & Data Model",
        }
    }

    /// The display name: the full name without its trailing parenthetical.
    pub fn short_name(&self) -> &'static str {
        short_category_name(self.full_name())
    }
}

/// Strip a trailing parenthetical from a category name.
///
/// `"Systems Thinking (FMS/IMS/PMS)"` becomes `"Systems Thinking"`; names
/// without `" ("` are returned unchanged.
pub fn short_category_name(full: &str) -> &str {
    full.split(" (").next().unwrap_or(full)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.full_name() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.full_name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Label shown next to the option (e.g. "A").
    pub label: String,
    /// Option text.
    pub text: String,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: QuestionId,
    /// Category the question is scored under.
    pub category: Category,
    /// The question text.
    pub text: String,
    /// Options in display order.
    pub options: Vec<AnswerOption>,
    /// Label of the correct option.
    pub correct_answer: String,
}

impl Question {
    /// Look up an option by its exact label.
    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// Whether `label` is the correct answer (exact, case-sensitive).
    pub fn is_correct(&self, label: &str) -> bool {
        self.correct_answer == label
    }
}

/// A question bank: an ordered, immutable set of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Report title (e.g. "MIS Executive Assessment").
    pub title: String,
    /// Subtitle shown on the start screen.
    #[serde(default)]
    pub subtitle: String,
    /// Domain label used in the evaluation text.
    pub domain: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Summary of this bank (without the questions).
    pub fn summary(&self) -> BankSummary {
        BankSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            domain: self.domain.clone(),
            question_count: self.questions.len(),
        }
    }
}

/// Summary of a question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub question_count: usize,
}

/// The person taking the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Respondent {
    /// Create a respondent, requiring a name and a plausible email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, String> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        if name.is_empty() {
            return Err("name is required".into());
        }
        if email.is_empty() {
            return Err("email is required".into());
        }
        if !email.contains('@') {
            return Err(format!("invalid email address: {email}"));
        }
        Ok(Self { name, email })
    }
}

/// The respondent's selections: question id to chosen option label.
///
/// At most one label per question. Missing entries are unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the selection for a question.
    pub fn select(&mut self, id: QuestionId, label: impl Into<String>) {
        self.0.insert(id, label.into());
    }

    /// The selected label for a question, if any.
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &str)> {
        self.0.iter().map(|(id, label)| (*id, label.as_str()))
    }
}

impl FromIterator<(QuestionId, String)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
