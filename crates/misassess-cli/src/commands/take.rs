//! The `misassess take` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::io::AsyncBufRead;

use misassess_core::config::load_config_from;
use misassess_core::error::SessionError;
use misassess_core::model::{Question, QuestionBank, Respondent};
use misassess_core::report::AssessmentReport;
use misassess_core::session::AssessmentSession;
use misassess_report::{build_summary, write_summary};

use super::{breakdown_table, resolve_bank, save_html_report, save_json_report};
use crate::clipboard::{copy_to_clipboard, Clipboard, CommandClipboard, CopyStatusDurations};
use crate::console::Console;
use crate::status::StatusLine;

const QUESTION_HELP: &str = "Commands: <option label> select, n next, p previous, g <number> jump, s submit, q quit";
const RESULTS_HELP: &str = "Commands: c copy summary, d download summary, h write HTML, j write JSON, r review, n retake, q quit";

/// Where exports go and how long copy statuses stay visible.
#[derive(Debug, Clone)]
pub struct TakeOptions {
    pub output_dir: PathBuf,
    pub durations: CopyStatusDurations,
}

pub async fn execute(
    bank_path: Option<PathBuf>,
    name: Option<String>,
    email: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = resolve_bank(bank_path.as_deref(), &config)?;
    let clipboard =
        CommandClipboard::from_config(&config).context("invalid clipboard configuration")?;
    let options = TakeOptions {
        output_dir: output.unwrap_or_else(|| config.output_dir.clone()),
        durations: CopyStatusDurations::from_config(&config),
    };

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut console = Console::new(input, std::io::stdout());
    run(&mut console, &bank, name, email, &clipboard, &options).await
}

/// Drive one interactive attempt from identity capture through export.
pub async fn run<R, W>(
    console: &mut Console<R, W>,
    bank: &QuestionBank,
    name: Option<String>,
    email: Option<String>,
    clipboard: &dyn Clipboard,
    options: &TakeOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say(&bank.title)?;
    if !bank.subtitle.is_empty() {
        console.say(&bank.subtitle)?;
    }
    console.blank()?;

    let Some(respondent) = read_respondent(console, name, email).await? else {
        console.say("Input closed before the assessment started.")?;
        return Ok(());
    };

    loop {
        let mut session = AssessmentSession::start(bank, respondent.clone());
        console.blank()?;
        console.say(QUESTION_HELP)?;
        let Some(report) = answer_questions(console, &mut session).await? else {
            return Ok(());
        };

        print_results(console, &report)?;
        match results_menu(console, bank, &report, clipboard, options).await? {
            MenuExit::Retake => console.say("Starting a new attempt.")?,
            MenuExit::Quit => return Ok(()),
        }
    }
}

/// How the post-submit menu was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuExit {
    Quit,
    Retake,
}

async fn read_respondent<R, W>(
    console: &mut Console<R, W>,
    mut name: Option<String>,
    mut email: Option<String>,
) -> Result<Option<Respondent>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let interactive = name.is_none() || email.is_none();
        let name_value = match name.take() {
            Some(n) => n,
            None => match console.prompt("Full Name: ").await? {
                Some(n) => n,
                None => return Ok(None),
            },
        };
        let email_value = match email.take() {
            Some(e) => e,
            None => match console.prompt("Email Address: ").await? {
                Some(e) => e,
                None => return Ok(None),
            },
        };

        match Respondent::new(name_value, email_value) {
            Ok(respondent) => return Ok(Some(respondent)),
            Err(message) if interactive => console.say(format!("{message}. Please try again."))?,
            Err(message) => anyhow::bail!(message),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Select(String),
    Next,
    Prev,
    GoTo(usize),
    Submit,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Option labels take precedence over command letters.
fn parse_action(input: &str, question: &Question) -> Action {
    if let Some(option) = question
        .options
        .iter()
        .find(|o| o.label.eq_ignore_ascii_case(input))
    {
        return Action::Select(option.label.clone());
    }
    match input.to_ascii_lowercase().as_str() {
        "" => Action::Show,
        "n" => Action::Next,
        "p" => Action::Prev,
        "s" => Action::Submit,
        "q" => Action::Quit,
        "?" | "help" => Action::Help,
        other => match other
            .strip_prefix('g')
            .and_then(|n| n.trim().parse::<usize>().ok())
        {
            Some(number) => Action::GoTo(number),
            None => Action::Unknown(input.to_string()),
        },
    }
}

async fn answer_questions<R, W>(
    console: &mut Console<R, W>,
    session: &mut AssessmentSession<'_>,
) -> Result<Option<AssessmentReport>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let total = session.bank().len();
    render_question(console, session)?;

    loop {
        let Some(question) = session.current_question() else {
            anyhow::bail!("question bank has no questions");
        };
        let prompt = format!("[{}/{} answered] > ", session.answered_count(), total);
        let Some(input) = console.prompt(&prompt).await? else {
            console.say("Input closed; assessment not submitted.")?;
            return Ok(None);
        };

        match parse_action(&input, question) {
            Action::Select(label) => match session.select(&label) {
                Ok(()) => console.say(format!("Selected {label}."))?,
                Err(e) => console.say(e)?,
            },
            Action::Next => {
                if session.next() {
                    render_question(console, session)?;
                } else {
                    console.say("Already at the last question.")?;
                }
            }
            Action::Prev => {
                if session.prev() {
                    render_question(console, session)?;
                } else {
                    console.say("Already at the first question.")?;
                }
            }
            Action::GoTo(number) => {
                let moved = match number.checked_sub(1) {
                    Some(index) => session.go_to(index),
                    None => Err(SessionError::OutOfRange { number, total }),
                };
                match moved {
                    Ok(()) => render_question(console, session)?,
                    Err(e) => console.say(e)?,
                }
            }
            Action::Submit => match session.submit() {
                Ok(submission) => return Ok(Some(submission.score())),
                Err(e) => console.say(e)?,
            },
            Action::Show => render_question(console, session)?,
            Action::Help => console.say(QUESTION_HELP)?,
            Action::Quit => {
                console.say("Assessment abandoned; nothing was submitted.")?;
                return Ok(None);
            }
            Action::Unknown(other) => {
                console.say(format!("Unknown command: {other}. Type ? for help."))?
            }
        }
    }
}

fn render_question<R, W>(console: &mut Console<R, W>, session: &AssessmentSession<'_>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Some(question) = session.current_question() else {
        return Ok(());
    };
    let selected = session.answers().get(question.id);

    console.blank()?;
    console.say(format!(
        "[{}/{}] {}",
        session.current_index() + 1,
        session.bank().len(),
        question.category
    ))?;
    console.say(&question.text)?;
    for option in &question.options {
        let marker = if selected == Some(option.label.as_str()) {
            "(*)"
        } else {
            "( )"
        };
        console.say(format!("  {marker} {}. {}", option.label, option.text))?;
    }
    console.say(format!(
        "Progress: {} of {} answered ({}%)",
        session.answered_count(),
        session.bank().len(),
        session.progress()
    ))
}

fn print_results<R, W>(console: &mut Console<R, W>, report: &AssessmentReport) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.blank()?;
    console.say(format!("{} — Results", report.bank.title))?;
    console.say(format!(
        "Overall: {}/{} ({}%)",
        report.score.total_score, report.score.total_questions, report.score_percentage
    ))?;
    console.say(format!(
        "Fit: {}  Recommendation: {}",
        report.level, report.recommendation
    ))?;
    console.say(breakdown_table(report))?;
    console.blank()?;
    console.say("Evaluation:")?;
    console.say(&report.evaluation)?;
    console.blank()
}

fn print_review<R, W>(console: &mut Console<R, W>, report: &AssessmentReport) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for (number, row) in report.review.iter().enumerate() {
        let verdict = if row.is_correct { "✓" } else { "✗" };
        console.say(format!(
            "{verdict} {:>2}. {:<30} your answer: {:<2} correct: {}",
            number + 1,
            row.category.short_name(),
            row.selected.as_deref().unwrap_or("-"),
            row.correct_answer
        ))?;
    }
    Ok(())
}

async fn results_menu<R, W>(
    console: &mut Console<R, W>,
    bank: &QuestionBank,
    report: &AssessmentReport,
    clipboard: &dyn Clipboard,
    options: &TakeOptions,
) -> Result<MenuExit>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let status = StatusLine::new();
    console.say(RESULTS_HELP)?;

    loop {
        let prompt = match status.current() {
            Some(message) => format!("[{message}] > "),
            None => "> ".to_string(),
        };
        let Some(input) = console.prompt(&prompt).await? else {
            return Ok(MenuExit::Quit);
        };

        // The summary is stamped when it is copied or downloaded.
        let saved = match input.to_ascii_lowercase().as_str() {
            "c" => {
                let summary = build_summary(report, Utc::now());
                copy_to_clipboard(clipboard, &summary, &status, options.durations).await;
                continue;
            }
            "d" => write_summary(&options.output_dir, &build_summary(report, Utc::now())),
            "h" => save_html_report(report, bank, &options.output_dir),
            "j" => save_json_report(report, &options.output_dir),
            "r" => {
                print_review(console, report)?;
                continue;
            }
            "n" => return Ok(MenuExit::Retake),
            "q" => return Ok(MenuExit::Quit),
            "?" | "help" | "" => {
                console.say(RESULTS_HELP)?;
                continue;
            }
            other => {
                console.say(format!("Unknown command: {other}. Type ? for help."))?;
                continue;
            }
        };

        // A failed export leaves the results on screen.
        match saved {
            Ok(path) => console.say(format!("Saved {}", path.display()))?,
            Err(e) => console.say(format!("Error: {e:#}"))?,
        }
    }
}
