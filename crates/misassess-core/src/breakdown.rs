//! Per-category breakdown derived from category statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::scoring::CategoryStats;

/// Category statistics with names and a rounded percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub short_name: String,
    pub full_name: String,
    pub correct: u32,
    pub total: u32,
    pub percent: u32,
}

/// Map category statistics to breakdown rows, preserving input order.
pub fn build_breakdown(category_scores: &IndexMap<Category, CategoryStats>) -> Vec<CategoryBreakdown> {
    category_scores
        .iter()
        .map(|(category, stats)| CategoryBreakdown {
            short_name: category.short_name().to_string(),
            full_name: category.full_name().to_string(),
            correct: stats.correct,
            total: stats.total,
            percent: stats.percent(),
        })
        .collect()
}

/// A copy of `breakdown` sorted by descending percent. Ties keep input order.
pub fn sorted_by_percent_desc(breakdown: &[CategoryBreakdown]) -> Vec<CategoryBreakdown> {
    let mut sorted = breakdown.to_vec();
    sorted.sort_by(|a, b| b.percent.cmp(&a.percent));
    sorted
}

/// A copy of `breakdown` sorted by ascending percent. Ties keep input order.
pub fn sorted_by_percent_asc(breakdown: &[CategoryBreakdown]) -> Vec<CategoryBreakdown> {
    let mut sorted = breakdown.to_vec();
    sorted.sort_by(|a, b| a.percent.cmp(&b.percent));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(Category, u32, u32)]) -> IndexMap<Category, CategoryStats> {
        entries
            .iter()
            .map(|&(c, correct, total)| (c, CategoryStats { correct, total }))
            .collect()
    }

    #[test]
    fn zero_total_gives_zero_percent() {
        let rows = build_breakdown(&scores(&[(Category::AppSheet, 0, 0)]));
        assert_eq!(rows[0].percent, 0);
        assert_eq!(rows[0].short_name, "AppSheet");
    }

    #[test]
    fn rounding_and_names() {
        let rows = build_breakdown(&scores(&[
            (Category::SystemsThinking, 3, 4),
            (Category::GoogleSheets, 1, 3),
            (Category::AppsScript, 2, 3),
        ]));
        assert_eq!(rows[0].percent, 75);
        assert_eq!(rows[0].short_name, "Systems Thinking");
        assert_eq!(rows[0].full_name, "Systems Thinking (FMS/IMS/PMS)");
        assert_eq!(rows[1].percent, 33);
        assert_eq!(rows[2].percent, 67);
    }

    #[test]
    fn build_is_pure() {
        let input = scores(&[
            (Category::Integration, 1, 1),
            (Category::AppSheet, 2, 4),
        ]);
        assert_eq!(build_breakdown(&input), build_breakdown(&input));
        assert_eq!(build_breakdown(&input)[0].short_name, "Integration & Data Model");
    }

    #[test]
    fn sorts_are_stable() {
        let rows = build_breakdown(&scores(&[
            (Category::SystemsThinking, 1, 2),
            (Category::GoogleSheets, 2, 2),
            (Category::AppsScript, 1, 2),
            (Category::AppSheet, 0, 2),
        ]));
        let desc: Vec<_> = sorted_by_percent_desc(&rows)
            .into_iter()
            .map(|r| r.short_name)
            .collect();
        assert_eq!(
            desc,
            vec![
                "Advanced Google Sheets",
                "Systems Thinking",
                "Google Apps Script + Web Apps",
                "AppSheet"
            ]
        );
        let asc: Vec<_> = sorted_by_percent_asc(&rows)
            .into_iter()
            .map(|r| r.short_name)
            .collect();
        assert_eq!(
            asc,
            vec![
                "AppSheet",
                "Systems Thinking",
                "Google Apps Script + Web Apps",
                "Advanced Google Sheets"
            ]
        );
        // Input untouched.
        assert_eq!(rows[0].short_name, "Systems Thinking");
    }
}
