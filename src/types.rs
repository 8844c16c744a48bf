//! Core types: Category, HoldingRecord, CategoryTotals

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// One of the three fixed asset buckets a holding is filed under.
///
/// Wire names (`"stock"`, `"commodity"`, `"bond"`) match the persisted
/// snapshot format and must not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Equities, corporate credit and real estate.
    #[default]
    Stock,
    /// Commodities.
    Commodity,
    /// Government bonds and cash.
    Bond,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Stock, Category::Commodity, Category::Bond];

    /// Wire name used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Stock => "stock",
            Category::Commodity => "commodity",
            Category::Bond => "bond",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts the wire name or the bucket letter (`a`/`b`/`c`), case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" | "a" => Ok(Category::Stock),
            "commodity" | "b" => Ok(Category::Commodity),
            "bond" | "c" => Ok(Category::Bond),
            other => Err(Error::InvalidCategory(other.to_string())),
        }
    }
}

/// A single user-entered line item.
///
/// `amount` may be negative (a liability). The label is free text and is
/// stored under `ticker` in snapshots; `label` is accepted on read. A `null`
/// amount, which is how a cleared amount field was saved, reads as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub category: Category,
    #[serde(rename = "ticker", alias = "label")]
    pub label: String,
    #[serde(deserialize_with = "amount_or_zero")]
    pub amount: f64,
}

fn amount_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl HoldingRecord {
    pub fn new(category: Category, label: impl Into<String>, amount: f64) -> Self {
        Self {
            category,
            label: label.into(),
            amount,
        }
    }
}

/// Parse a user-supplied amount.
///
/// Rejects empty input and anything that does not parse to a finite number,
/// so NaN never reaches the ledger. Comma and underscore digit separators
/// are ignored.
pub fn parse_amount(text: &str) -> Result<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Err(Error::InvalidAmount("empty amount".into()));
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidAmount(format!("'{}' is not a number", text.trim())))?;
    if !value.is_finite() {
        return Err(Error::InvalidAmount(format!("'{}' is not finite", text.trim())));
    }
    Ok(value)
}

/// Per-category sums of holding amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub stock: f64,
    pub commodity: f64,
    pub bond: f64,
}

impl CategoryTotals {
    pub const ZERO: CategoryTotals = CategoryTotals {
        stock: 0.0,
        commodity: 0.0,
        bond: 0.0,
    };

    pub fn new(stock: f64, commodity: f64, bond: f64) -> Self {
        Self {
            stock,
            commodity,
            bond,
        }
    }

    /// Sum across all three categories.
    #[inline]
    pub fn total(&self) -> f64 {
        self.stock + self.commodity + self.bond
    }

    #[inline]
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Stock => self.stock,
            Category::Commodity => self.commodity,
            Category::Bond => self.bond,
        }
    }

    pub(crate) fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Stock => &mut self.stock,
            Category::Commodity => &mut self.commodity,
            Category::Bond => &mut self.bond,
        }
    }

    /// `(category, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Sub for CategoryTotals {
    type Output = CategoryTotals;

    fn sub(self, rhs: CategoryTotals) -> CategoryTotals {
        CategoryTotals {
            stock: self.stock - rhs.stock,
            commodity: self.commodity - rhs.commodity,
            bond: self.bond - rhs.bond,
        }
    }
}
