//! Coaching knowledge base.
//!
//! Canned strength and improvement text, keyed by category short name.

/// Tip used when a category has no coaching entry.
pub const FALLBACK_TIP: &str = "Focus on fundamentals and real projects.";

/// Coaching content for one category.
#[derive(Debug, Clone, Copy)]
pub struct CoachingEntry {
    /// Category short name this entry belongs to.
    pub short_name: &'static str,
    pub strengths: &'static [&'static str],
    pub improve: &'static [&'static str],
}

impl CoachingEntry {
    /// The first improvement tip, or [`FALLBACK_TIP`] when there is none.
    pub fn first_tip(&self) -> &'static str {
        self.improve.first().copied().unwrap_or(FALLBACK_TIP)
    }
}

static COACHING: &[CoachingEntry] = &[
    CoachingEntry {
        short_name: "Systems Thinking",
        strengths: &[
            "Understands process mapping, ownership, and control points (TAT/escalations).",
            "Thinks in workflows, not just reports and dashboards.",
        ],
        improve: &[
            "Practice defining a clean data model: unique IDs, statuses, SLA, exception queues.",
            "Design control mechanisms (auto-alerts + reason capture), not only visibility.",
        ],
    },
    CoachingEntry {
        short_name: "Advanced Google Sheets",
        strengths: &[
            "Comfortable with array logic (FILTER/QUERY/ARRAYFORMULA) and structured tables.",
            "Understands reliability patterns: validation, protections, audit logs.",
        ],
        improve: &[
            "Optimize for scale: bounded ranges, helper columns, avoid giant nested formulas.",
            "Standardize data cleaning (e.g., phone normalization) to prevent silent mismatches.",
        ],
    },
    CoachingEntry {
        short_name: "Google Apps Script + Web Apps",
        strengths: &[
            "Knows performance basics: batch reads/writes, process in memory.",
            "Understands workflow logging patterns (history log, status change tracking).",
        ],
        improve: &[
            "Get sharper on concurrency & safety: LockService, idempotency, retries.",
            "Move configs to PropertiesService/SETTINGS sheet and reduce hardcoding.",
        ],
    },
    CoachingEntry {
        short_name: "AppSheet",
        strengths: &[
            "Understands core app concepts: slices, automations/bots, controlled transitions.",
            "Recognizes row-level security as a first-class requirement.",
        ],
        improve: &[
            "Go deeper on security filters + role-based UX (branch/team isolation).",
            "Design status-driven validations/actions to prevent incomplete submissions.",
        ],
    },
    CoachingEntry {
        short_name: "Integration & Data Model",
        strengths: &[
            "Understands the importance of unique IDs and standardized statuses.",
            "Thinks about unified views across systems (FMS/IMS/PMS) using a single model.",
        ],
        improve: &[
            "Learn event-driven pipelines (source of truth, sync rules, conflict handling).",
            "Define canonical entities + mapping tables to avoid copy-paste integration.",
        ],
    },
];

/// Look up the coaching entry for a category short name.
pub fn lookup(short_name: &str) -> Option<&'static CoachingEntry> {
    COACHING.iter().find(|e| e.short_name == short_name)
}

/// The first improvement tip for a short name, falling back to [`FALLBACK_TIP`].
pub fn improvement_tip(short_name: &str) -> &'static str {
    lookup(short_name)
        .map(CoachingEntry::first_tip)
        .unwrap_or(FALLBACK_TIP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn every_category_has_coaching() {
        for c in Category::ALL {
            let entry = lookup(c.short_name())
                .unwrap_or_else(|| panic!("no coaching for {}", c.short_name()));
            assert!(!entry.strengths.is_empty());
            assert!(!entry.improve.is_empty());
        }
    }

    #[test]
    fn improvement_tip_falls_back() {
        assert_eq!(improvement_tip("Underwater Basket Weaving"), FALLBACK_TIP);
        assert!(improvement_tip("AppSheet").starts_with("Go deeper on security filters"));
    }

    #[test]
    fn lookup_uses_short_name() {
        assert!(lookup("Systems Thinking (FMS/IMS/PMS)").is_none());
        assert!(lookup("Systems Thinking").is_some());
    }
}
