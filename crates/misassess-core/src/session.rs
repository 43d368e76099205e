//! Assessment session state.
//!
//! Tracks the respondent, the current question, and the answers collected so
//! far. Submitting freezes the answers and hands them to the scoring pipeline.

use crate::error::SessionError;
use crate::model::{AnswerMap, Question, QuestionBank, Respondent};
use crate::report::AssessmentReport;

/// One in-progress attempt at a question bank.
#[derive(Debug, Clone)]
pub struct AssessmentSession<'a> {
    bank: &'a QuestionBank,
    respondent: Respondent,
    answers: AnswerMap,
    current_index: usize,
    submitted: bool,
}

impl<'a> AssessmentSession<'a> {
    /// Start a session at the first question.
    pub fn start(bank: &'a QuestionBank, respondent: Respondent) -> Self {
        tracing::debug!(bank = %bank.id, respondent = %respondent.name, "assessment started");
        Self {
            bank,
            respondent,
            answers: AnswerMap::new(),
            current_index: 0,
            submitted: false,
        }
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.bank.questions.get(self.current_index)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Select an option for the current question, replacing any earlier choice.
    pub fn select(&mut self, label: &str) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let question = self.current_question().ok_or(SessionError::OutOfRange {
            number: self.current_index + 1,
            total: self.bank.questions.len(),
        })?;
        if question.option(label).is_none() {
            return Err(SessionError::UnknownOption {
                question_id: question.id,
                label: label.to_string(),
            });
        }
        self.answers.select(question.id, label);
        Ok(())
    }

    /// Move to the next question. Returns `false` at the last question.
    pub fn next(&mut self) -> bool {
        if self.current_index + 1 < self.bank.questions.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question. Returns `false` at the first question.
    pub fn prev(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a question by zero-based index.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.bank.questions.len() {
            return Err(SessionError::OutOfRange {
                number: index + 1,
                total: self.bank.questions.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Number of questions with a selection.
    pub fn answered_count(&self) -> usize {
        self.bank
            .questions
            .iter()
            .filter(|q| self.answers.contains(q.id))
            .count()
    }

    /// Percentage of questions answered, 0–100.
    pub fn progress(&self) -> u32 {
        crate::scoring::percent(
            self.answered_count() as u32,
            self.bank.questions.len() as u32,
        )
    }

    /// Submission is only permitted once every question has an answer.
    pub fn can_submit(&self) -> bool {
        !self.submitted && self.answered_count() == self.bank.questions.len()
    }

    /// Freeze the answers. Fails while any question is unanswered.
    pub fn submit(&mut self) -> Result<Submission<'a>, SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let answered = self.answered_count();
        let total = self.bank.questions.len();
        if answered < total {
            return Err(SessionError::Incomplete { answered, total });
        }
        self.submitted = true;
        tracing::info!(respondent = %self.respondent.name, "assessment submitted");
        Ok(Submission::new(
            self.bank,
            self.respondent.clone(),
            self.answers.clone(),
        ))
    }
}

/// A frozen set of answers ready for scoring.
#[derive(Debug, Clone)]
pub struct Submission<'a> {
    bank: &'a QuestionBank,
    respondent: Respondent,
    answers: AnswerMap,
}

impl<'a> Submission<'a> {
    /// Wrap answers collected outside a session (e.g. from an answers file).
    ///
    /// Missing answers are allowed and count as incorrect.
    pub fn new(bank: &'a QuestionBank, respondent: Respondent, answers: AnswerMap) -> Self {
        Self {
            bank,
            respondent,
            answers,
        }
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    /// Run the scoring pipeline.
    pub fn score(&self) -> AssessmentReport {
        AssessmentReport::generate(self.bank, &self.respondent, &self.answers)
    }
}
