//! The `misassess validate` command.

use std::path::PathBuf;

use anyhow::Result;

use misassess_core::bank::{
    builtin_source, parse_question_bank, parse_question_bank_str, validate_question_bank,
};

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    // Parse without validating so every issue can be listed.
    let bank = match &bank_path {
        Some(path) => parse_question_bank(path)?,
        None => parse_question_bank_str(builtin_source(), "built-in")?,
    };

    println!("Question bank: {} ({} questions)", bank.title, bank.len());

    let issues = validate_question_bank(&bank);
    for issue in &issues {
        println!("  WARNING: {issue}");
    }

    if issues.is_empty() {
        println!("Question bank valid.");
        Ok(())
    } else {
        anyhow::bail!("{} issue(s) found.", issues.len())
    }
}
