//! misassess-report — Summary text, export artifact, and HTML report generation.

pub mod export;
pub mod html;
pub mod summary;

pub use export::{write_summary, SUMMARY_FILENAME, SUMMARY_MIME_TYPE};
pub use summary::build_summary;
