//! Reduce a list of holdings into per-category totals.

use crate::types::{CategoryTotals, HoldingRecord};

/// Sum holding amounts per category.
///
/// Always starts from zero and walks the whole slice; callers recompute
/// from scratch on every change rather than patching a previous result.
/// An empty slice yields all-zero totals.
pub fn aggregate(records: &[HoldingRecord]) -> CategoryTotals {
    records.iter().fold(CategoryTotals::ZERO, |mut totals, r| {
        *totals.get_mut(r.category) += r.amount;
        totals
    })
}
