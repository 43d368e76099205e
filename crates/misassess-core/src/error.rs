//! Error types for question-bank loading and assessment sessions.

use thiserror::Error;

use crate::model::QuestionId;

/// A problem found while validating a question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Issue message.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.question_id {
            Some(id) => write!(f, "[question {id}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Errors that can occur when loading a question bank.
///
/// A malformed bank has no runtime recovery path, so these are fatal at load time.
#[derive(Debug, Clone, Error)]
pub enum BankError {
    /// The bank file could not be read.
    #[error("failed to read question bank {path}: {message}")]
    Io { path: String, message: String },

    /// The bank file is not valid TOML or does not match the schema.
    #[error("failed to parse question bank {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// The bank parsed but violates an integrity rule.
    #[error("invalid question bank {source_name}: {}", format_issues(.issues))]
    Invalid {
        source_name: String,
        issues: Vec<ValidationIssue>,
    },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from assessment session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Submission attempted before every question has an answer.
    #[error("{answered} of {total} questions answered; answer all questions before submitting")]
    Incomplete { answered: usize, total: usize },

    /// The session was already submitted and is frozen.
    #[error("assessment already submitted")]
    AlreadySubmitted,

    /// The label is not an option of the current question.
    #[error("question {question_id} has no option {label:?}")]
    UnknownOption {
        question_id: QuestionId,
        label: String,
    },

    /// Navigation target out of range.
    #[error("question number {number} out of range (1-{total})")]
    OutOfRange { number: usize, total: usize },
}
