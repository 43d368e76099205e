//! The `misassess init` command.

use std::path::Path;

use anyhow::{Context, Result};

use misassess_core::config::{AssessConfig, CONFIG_FILE_NAME};
use misassess_core::model::QuestionBank;

const ANSWERS_TEMPLATE_NAME: &str = "answers.example.toml";

pub fn execute() -> Result<()> {
    init_in(Path::new("."))?;

    println!("\nNext steps:");
    println!("  1. Run: misassess take");
    println!("  2. Or fill in {ANSWERS_TEMPLATE_NAME} and run:");
    println!("     misassess score --answers {ANSWERS_TEMPLATE_NAME} --name \"Jane Doe\" --email jane@example.com");

    Ok(())
}

fn init_in(dir: &Path) -> Result<()> {
    write_if_absent(&dir.join(CONFIG_FILE_NAME), &sample_config()?)?;

    let bank = QuestionBank::builtin().context("built-in question bank is invalid")?;
    write_if_absent(&dir.join(ANSWERS_TEMPLATE_NAME), &answers_template(bank))?;
    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if path.exists() {
        println!("{name} already exists, skipping.");
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {name}");
    }
    Ok(())
}

fn sample_config() -> Result<String> {
    let defaults =
        toml::to_string(&AssessConfig::default()).context("failed to render default config")?;
    Ok(format!(
        "# misassess configuration\n\
         \n\
         # Question bank to use instead of the built-in one.\n\
         # question_bank = \"question-banks/mis-executive.toml\"\n\
         \n\
         # Command that receives the summary on stdin.\n\
         # clipboard_command = \"xclip -selection clipboard\"\n\
         \n\
         {defaults}"
    ))
}

/// One commented entry per question, so answers can be filled in place.
fn answers_template(bank: &QuestionBank) -> String {
    let mut out = format!(
        "# Answers for \"{}\". Uncomment a line and set the option label.\n\
         # Unanswered questions count as incorrect.\n\
         \n\
         [answers]\n",
        bank.title
    );
    for q in &bank.questions {
        let labels = q
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join("/");
        out.push_str(&format!(
            "# {} = \"\"  # {} [{labels}]\n",
            q.id,
            q.category.short_name()
        ));
    }
    out
}
