//! Answers file loader for batch scoring.
//!
//! An answers file maps question ids to option labels, either as a TOML
//! `[answers]` table or as a JSON object with an `answers` member.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ValidationIssue;
use crate::model::{AnswerMap, QuestionBank, QuestionId};

#[derive(Debug, Deserialize)]
struct AnswersFile {
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

/// Load an answers file. `.json` files are parsed as JSON, anything else as TOML.
pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let file: AnswersFile = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))?
    };

    into_answer_map(file)
}

/// Parse a TOML answers document (useful for testing).
pub fn parse_answers_toml(content: &str) -> Result<AnswerMap> {
    let file: AnswersFile = toml::from_str(content).context("failed to parse answers TOML")?;
    into_answer_map(file)
}

fn into_answer_map(file: AnswersFile) -> Result<AnswerMap> {
    file.answers
        .into_iter()
        .map(|(key, label)| {
            let id: QuestionId = key
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid question id: '{key}'"))?;
            Ok((id, label))
        })
        .collect()
}

/// Report answers that cannot score: unknown question ids and labels that
/// are not options of their question. Such answers simply count as incorrect.
pub fn check_answers(bank: &QuestionBank, answers: &AnswerMap) -> Vec<ValidationIssue> {
    answers
        .iter()
        .filter_map(|(id, label)| match bank.question(id) {
            None => Some(ValidationIssue {
                question_id: Some(id),
                message: "no such question in the bank".into(),
            }),
            Some(q) if q.option(label).is_none() => Some(ValidationIssue {
                question_id: Some(id),
                message: format!("{label:?} is not an option"),
            }),
            Some(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toml_answers() {
        let answers = parse_answers_toml(
            r#"
[answers]
1 = "B"
13 = "A"
"24" = "C"
"#,
        )
        .unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(13), Some("A"));
        assert_eq!(answers.get(24), Some("C"));
    }

    #[test]
    fn missing_table_is_empty() {
        assert!(parse_answers_toml("").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = parse_answers_toml("[answers]\nfirst = \"B\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid question id"));
    }

    #[test]
    fn load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("answers.json");
        std::fs::write(&json, r#"{"answers": {"2": "B", "3": "C"}}"#).unwrap();
        let toml = dir.path().join("answers.toml");
        std::fs::write(&toml, "[answers]\n2 = \"B\"\n3 = \"C\"\n").unwrap();

        assert_eq!(load_answers(&json).unwrap(), load_answers(&toml).unwrap());
    }

    #[test]
    fn check_flags_unknown_ids_and_labels() {
        let bank = QuestionBank::builtin().unwrap();
        let answers: AnswerMap = [
            (1, "B".to_string()),
            (2, "b".to_string()),
            (99, "A".to_string()),
        ]
        .into_iter()
        .collect();
        let issues = check_answers(bank, &answers);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].question_id, Some(2));
        assert_eq!(issues[1].question_id, Some(99));
    }
}
