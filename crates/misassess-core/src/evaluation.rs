//! Rule-based evaluation generator.
//!
//! Turns an overall percentage and a category breakdown into a short
//! coaching report with a fit level and a hiring recommendation. The output
//! is fully deterministic: same inputs, same text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::breakdown::{sorted_by_percent_asc, sorted_by_percent_desc, CategoryBreakdown};
use crate::coaching;

/// Minimum overall percentage for a "Hire" recommendation.
pub const HIRE_THRESHOLD: u32 = 75;

/// Domain label used when the caller does not supply one.
pub const DEFAULT_DOMAIN: &str = "MIS Systems + Automation";

/// Number of categories listed as strengths and as gaps.
const HIGHLIGHT_COUNT: usize = 2;

/// How well the candidate fits the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLevel {
    Strong,
    Good,
    Developing,
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl FitLevel {
    /// Band an overall percentage. Bands are checked top-down.
    pub fn from_percentage(score_percentage: u32) -> Self {
        match score_percentage {
            p if p >= 85 => FitLevel::Strong,
            p if p >= 75 => FitLevel::Good,
            p if p >= 60 => FitLevel::Developing,
            _ => FitLevel::NotReady,
        }
    }
}

impl fmt::Display for FitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitLevel::Strong => write!(f, "Strong"),
            FitLevel::Good => write!(f, "Good"),
            FitLevel::Developing => write!(f, "Developing"),
            FitLevel::NotReady => write!(f, "Not Ready"),
        }
    }
}

/// Hiring recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Hire,
    #[serde(rename = "Train Further")]
    TrainFurther,
}

impl Recommendation {
    pub fn from_percentage(score_percentage: u32) -> Self {
        if score_percentage >= HIRE_THRESHOLD {
            Recommendation::Hire
        } else {
            Recommendation::TrainFurther
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Hire => write!(f, "Hire"),
            Recommendation::TrainFurther => write!(f, "Train Further"),
        }
    }
}

/// A weak category together with the coaching tip for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub category: CategoryBreakdown,
    pub tip: String,
}

/// A structured evaluation. `Display` renders the report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub candidate_name: String,
    pub domain: String,
    pub score_percentage: u32,
    pub level: FitLevel,
    pub recommendation: Recommendation,
    /// Top categories by descending percent.
    pub strengths: Vec<CategoryBreakdown>,
    /// Bottom categories by ascending percent. May overlap `strengths`.
    pub gaps: Vec<Gap>,
}

impl Evaluation {
    /// Apply the evaluation heuristics to a breakdown.
    pub fn build(
        candidate_name: &str,
        domain: &str,
        score_percentage: u32,
        breakdown: &[CategoryBreakdown],
    ) -> Self {
        let strengths: Vec<CategoryBreakdown> = sorted_by_percent_desc(breakdown)
            .into_iter()
            .take(HIGHLIGHT_COUNT)
            .collect();

        let gaps: Vec<Gap> = sorted_by_percent_asc(breakdown)
            .into_iter()
            .take(HIGHLIGHT_COUNT)
            .map(|category| Gap {
                tip: coaching::improvement_tip(&category.short_name).to_string(),
                category,
            })
            .collect();

        Self {
            candidate_name: candidate_name.to_string(),
            domain: domain.to_string(),
            score_percentage,
            level: FitLevel::from_percentage(score_percentage),
            recommendation: Recommendation::from_percentage(score_percentage),
            strengths,
            gaps,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strengths_line = self
            .strengths
            .iter()
            .map(|c| format!("{} ({}/{})", c.short_name, c.correct, c.total))
            .collect::<Vec<_>>()
            .join(", ");

        let gap_bullets = self
            .gaps
            .iter()
            .map(|g| format!("• {}: {}", g.category.short_name, g.tip))
            .collect::<Vec<_>>()
            .join("\n");

        write!(
            f,
            "{}: {} fit for {}. Overall score {}%. Strength areas: {}.\n\n",
            self.candidate_name, self.level, self.domain, self.score_percentage, strengths_line
        )?;
        write!(
            f,
            "Biggest gaps to close next (practical, not theory):\n{gap_bullets}\n\n"
        )?;
        write!(
            f,
            "Recommendation: {} (threshold {HIRE_THRESHOLD}%).",
            self.recommendation
        )
    }
}

/// Generate the evaluation text for the default domain.
pub fn generate_evaluation(
    candidate_name: &str,
    score_percentage: u32,
    breakdown: &[CategoryBreakdown],
) -> String {
    Evaluation::build(candidate_name, DEFAULT_DOMAIN, score_percentage, breakdown).to_string()
}
