//! misassess-core — Question bank, scoring engine, and rule-based evaluation.
//!
//! This crate defines the data model, the question-bank loader, and the pure
//! scoring and evaluation pipeline that the rest of misassess builds on:
//! collect answers, freeze, score, build the breakdown, generate the evaluation.

pub mod answers;
pub mod bank;
pub mod breakdown;
pub mod coaching;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;

pub use error::{BankError, SessionError, ValidationIssue};
