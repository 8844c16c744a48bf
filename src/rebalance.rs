//! CURRENT→IDEAL rebalancing.
//!
//! Distributes the portfolio total across the three categories by fixed
//! weights and reports the signed adjustment per category. No rounding is
//! applied; formatting is left to whoever displays the result.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Category, CategoryTotals};

/// Target share of the total held in stocks, credit and real estate.
pub const STOCK_WEIGHT: f64 = 0.5;
/// Target share of the total held in commodities.
pub const COMMODITY_WEIGHT: f64 = 0.3;
/// Target share of the total held in government bonds and cash.
pub const BOND_WEIGHT: f64 = 0.2;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Target allocation weights, one per category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub stock: f64,
    pub commodity: f64,
    pub bond: f64,
}

impl Weights {
    pub const DEFAULT: Weights = Weights {
        stock: STOCK_WEIGHT,
        commodity: COMMODITY_WEIGHT,
        bond: BOND_WEIGHT,
    };

    /// Build a validated weight set.
    ///
    /// Each weight must be finite and in `[0.0, 1.0]`, and together they
    /// must sum to 1.0.
    pub fn new(stock: f64, commodity: f64, bond: f64) -> Result<Self> {
        let weights = Self {
            stock,
            commodity,
            bond,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (category, w) in self.iter() {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(Error::InvalidWeights(format!(
                    "{category} weight {w} must be in [0.0, 1.0]"
                )));
            }
        }
        let sum = self.stock + self.commodity + self.bond;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::InvalidWeights(format!(
                "weights sum to {sum:.6} (expected 1.0)"
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Stock => self.stock,
            Category::Commodity => self.commodity,
            Category::Bond => self.bond,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Trade direction implied by an operation amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Positive amounts buy, negative amounts sell, exactly zero holds.
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Action::Buy
        } else if amount < 0.0 {
            Action::Sell
        } else {
            Action::Hold
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

/// Ideal allocation plus the adjustment needed to reach it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RebalanceResult {
    /// Total distributed by the target weights.
    pub ideal: CategoryTotals,
    /// `ideal - current` per category (positive = buy).
    pub operation: CategoryTotals,
}

impl RebalanceResult {
    pub fn action(&self, category: Category) -> Action {
        Action::from_amount(self.operation.get(category))
    }
}

/// Rebalance against the default 50/30/20 weights.
pub fn rebalance(current: &CategoryTotals) -> RebalanceResult {
    rebalance_with(current, &Weights::DEFAULT)
}

/// Rebalance against an explicit weight set.
///
/// A negative total yields negative ideals in the same proportions.
pub fn rebalance_with(current: &CategoryTotals, weights: &Weights) -> RebalanceResult {
    let total = current.total();
    let ideal = CategoryTotals {
        stock: total * weights.stock,
        commodity: total * weights.commodity,
        bond: total * weights.bond,
    };
    RebalanceResult {
        ideal,
        operation: ideal - *current,
    }
}
