use crate::model::{Catalog, CompletionState, ProgressRecord};

//
// ─── REMAINING TERMS ───────────────────────────────────────────────────────────
//

/// Sanitized count of terms left in the career, always at least 1.
///
/// User input for this value is advisory only, so invalid input substitutes
/// the minimum instead of failing: the statistics engine never divides by
/// zero and never sees a non-positive terms count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTerms(u32);

impl RemainingTerms {
    /// Creates a terms count, substituting 1 for values below 1.
    #[must_use]
    pub fn new(terms: i64) -> Self {
        if terms < 1 {
            Self(1)
        } else {
            Self(u32::try_from(terms).unwrap_or(u32::MAX))
        }
    }

    /// Parses user input, substituting 1 for anything non-numeric.
    ///
    /// The whole trimmed token must be an integer; trailing garbage counts
    /// as non-numeric.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input.trim().parse::<i64>().map_or(Self(1), Self::new)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for RemainingTerms {
    fn default() -> Self {
        Self(1)
    }
}

//
// ─── STATISTICS ────────────────────────────────────────────────────────────────
//

/// Aggregate credit statistics derived from a catalog and a progress record.
///
/// Values are exact; rounding for display is the presentation layer's
/// business.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub approved_credits: u32,
    pub in_progress_credits: u32,
    pub pending_credits: u32,
    pub progress_percent: f64,
    pub average_credits_per_term: f64,
}

/// Derives the statistics block for the current record.
///
/// Pending credits count everything not yet approved against the career
/// total; in-progress credits remain part of the pending workload. Credit
/// sums saturate and the percentage stays within 0 to 100 when the catalog
/// overshoots the career total; a total of zero degrades the percentage to
/// 0 instead of NaN.
#[must_use]
pub fn compute_statistics(
    catalog: &Catalog,
    record: &ProgressRecord,
    remaining_terms: RemainingTerms,
    total_career_credits: u32,
) -> Statistics {
    let mut approved_credits = 0u32;
    let mut in_progress_credits = 0u32;

    for course in catalog.courses() {
        match record.get(course.id()) {
            CompletionState::Approved => {
                approved_credits = approved_credits.saturating_add(course.credits());
            }
            CompletionState::InProgress => {
                in_progress_credits = in_progress_credits.saturating_add(course.credits());
            }
            CompletionState::NotTaken => {}
        }
    }

    let pending_credits = total_career_credits.saturating_sub(approved_credits);

    let progress_percent = if total_career_credits == 0 {
        0.0
    } else {
        (f64::from(approved_credits) * 100.0 / f64::from(total_career_credits)).min(100.0)
    };

    let average_credits_per_term = f64::from(pending_credits) / f64::from(remaining_terms.get());

    Statistics {
        approved_credits,
        in_progress_credits,
        pending_credits,
        progress_percent,
        average_credits_per_term,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
