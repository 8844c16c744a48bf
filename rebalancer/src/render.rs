//! Terminal rendering of holdings and rebalance results.
//!
//! All rounding happens here; the core hands over raw floats.

use nanofolio::{Action, Category, CategoryTotals, HoldingRecord, RebalanceResult};

use crate::config::DisplayConfig;

/// Human-readable name of a category.
pub fn category_name(category: Category) -> &'static str {
    match category {
        Category::Stock => "Stocks, credit & real estate",
        Category::Commodity => "Commodities",
        Category::Bond => "Government bonds & cash",
    }
}

/// Format with a fixed number of decimals and comma thousands separators.
///
/// `format_number(1234567.891, 2)` gives `"1,234,567.89"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Avoid "-0.00" for values that round to zero.
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats amounts according to the display config.
pub struct Renderer<'a> {
    display: &'a DisplayConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self { display }
    }

    /// Scale, round and suffix an amount (`5000000` → `"500.00 万"`).
    pub fn amount(&self, value: f64) -> String {
        let scaled = format_number(value / self.display.unit_scale, self.display.decimals);
        if self.display.unit_suffix.is_empty() {
            scaled
        } else {
            format!("{scaled} {}", self.display.unit_suffix)
        }
    }

    /// IDEAL / OPERATION / BREAKDOWN summary.
    pub fn summary(&self, totals: &CategoryTotals, result: &RebalanceResult) -> String {
        let mut out = String::new();

        out.push_str("IDEAL:\n");
        for (category, value) in result.ideal.iter() {
            out.push_str(&format!(
                "  {:30} {:>18}\n",
                category_name(category),
                self.amount(value)
            ));
        }

        out.push_str("\nOPERATION:\n");
        for (category, value) in result.operation.iter() {
            let action = result.action(category);
            let shown = match action {
                Action::Hold => self.amount(0.0),
                _ => self.amount(value.abs()),
            };
            out.push_str(&format!(
                "  {:30} {:>4} {:>18}\n",
                category_name(category),
                format!("{action}"),
                shown
            ));
        }

        out.push_str("\nBREAKDOWN:\n");
        out.push_str(&format!("  {:30} {:>18}\n", "Total", self.amount(totals.total())));
        for (category, value) in totals.iter() {
            out.push_str(&format!(
                "  {:30} {:>18}\n",
                category_name(category),
                self.amount(value)
            ));
        }
        out
    }

    /// Numbered holdings table.
    pub fn holdings(&self, records: &[HoldingRecord]) -> String {
        if records.is_empty() {
            return "No holdings.\n".into();
        }

        let mut out = format!("  {:>3}  {:10} {:16} {:>18}\n", "#", "Category", "Ticker", "Amount");
        for (i, r) in records.iter().enumerate() {
            out.push_str(&format!(
                "  {:>3}  {:10} {:16} {:>18}\n",
                i,
                r.category.as_str(),
                r.label,
                self.amount(r.amount)
            ));
        }
        out
    }
}
