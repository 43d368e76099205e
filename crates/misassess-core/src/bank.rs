//! TOML question bank loader.
//!
//! Loads question banks from TOML files and validates their integrity. The
//! built-in bank is embedded at build time and parsed once per process.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::coaching;
use crate::error::{BankError, ValidationIssue};
use crate::model::{AnswerOption, Category, Question, QuestionBank, QuestionId};

const BUILTIN_BANK: &str = include_str!("../../../question-banks/mis-executive.toml");
const BUILTIN_SOURCE: &str = "builtin:mis-executive";

static BUILTIN: OnceLock<Result<QuestionBank, BankError>> = OnceLock::new();

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default = "default_domain")]
    domain: String,
}

fn default_domain() -> String {
    crate::evaluation::DEFAULT_DOMAIN.to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: QuestionId,
    category: String,
    text: String,
    correct_answer: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    label: String,
    text: String,
}

impl QuestionBank {
    /// The built-in MIS Executive Assessment bank.
    ///
    /// Parsed and validated on first use; later calls return the same value.
    pub fn builtin() -> Result<&'static QuestionBank, BankError> {
        BUILTIN
            .get_or_init(|| load_question_bank_str(BUILTIN_BANK, BUILTIN_SOURCE))
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Raw TOML text of the built-in bank.
pub fn builtin_source() -> &'static str {
    BUILTIN_BANK
}

/// Parse a single TOML file into a `QuestionBank` without validating it.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank, BankError> {
    let content = std::fs::read_to_string(path).map_err(|e| BankError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_question_bank_str(&content, &path.display().to_string())
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_name: &str) -> Result<QuestionBank, BankError> {
    let parse_err = |message: String| BankError::Parse {
        source_name: source_name.to_string(),
        message,
    };

    let parsed: TomlBankFile = toml::from_str(content).map_err(|e| parse_err(e.to_string()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let category: Category = q
                .category
                .parse()
                .map_err(|e: String| parse_err(format!("question {}: {e}", q.id)))?;

            Ok(Question {
                id: q.id,
                category,
                text: q.text,
                options: q
                    .options
                    .into_iter()
                    .map(|o| AnswerOption {
                        label: o.label,
                        text: o.text,
                    })
                    .collect(),
                correct_answer: q.correct_answer,
            })
        })
        .collect::<Result<Vec<_>, BankError>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        title: parsed.bank.title,
        subtitle: parsed.bank.subtitle,
        domain: parsed.bank.domain,
        questions,
    })
}

/// Parse and validate a bank file. Any validation issue is fatal.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank, BankError> {
    let bank = parse_question_bank(path)?;
    ensure_valid(bank, &path.display().to_string())
}

/// Parse and validate a bank from a string. Any validation issue is fatal.
pub fn load_question_bank_str(content: &str, source_name: &str) -> Result<QuestionBank, BankError> {
    let bank = parse_question_bank_str(content, source_name)?;
    ensure_valid(bank, source_name)
}

fn ensure_valid(bank: QuestionBank, source_name: &str) -> Result<QuestionBank, BankError> {
    let issues = validate_question_bank(&bank);
    if !issues.is_empty() {
        return Err(BankError::Invalid {
            source_name: source_name.to_string(),
            issues,
        });
    }
    tracing::debug!(
        bank = %bank.id,
        questions = bank.questions.len(),
        "loaded question bank from {source_name}"
    );
    Ok(bank)
}

/// Validate a question bank for integrity problems.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if bank.questions.is_empty() {
        issues.push(ValidationIssue {
            question_id: None,
            message: "question bank is empty".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(q.id) {
            issues.push(ValidationIssue {
                question_id: Some(q.id),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &bank.questions {
        if q.text.trim().is_empty() {
            issues.push(ValidationIssue {
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }

        if q.options.is_empty() {
            issues.push(ValidationIssue {
                question_id: Some(q.id),
                message: "question has no options".into(),
            });
        }

        let mut seen_labels = HashSet::new();
        for opt in &q.options {
            if !seen_labels.insert(opt.label.as_str()) {
                issues.push(ValidationIssue {
                    question_id: Some(q.id),
                    message: format!("duplicate option label: {}", opt.label),
                });
            }
        }

        if q.option(&q.correct_answer).is_none() {
            issues.push(ValidationIssue {
                question_id: Some(q.id),
                message: format!(
                    "correct answer {:?} does not match any option label",
                    q.correct_answer
                ),
            });
        }

        if coaching::lookup(q.category.short_name()).is_none() {
            issues.push(ValidationIssue {
                question_id: Some(q.id),
                message: format!(
                    "category {:?} has no coaching entry",
                    q.category.short_name()
                ),
            });
        }
    }

    issues
}
