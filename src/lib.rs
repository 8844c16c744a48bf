//! # nanofolio
//!
//! A three-bucket portfolio rebalancing core with a write-through holdings
//! ledger.
//!
//! ## Features
//!
//! - **Aggregation**: holdings reduce to per-category totals, recomputed
//!   from scratch on every change
//! - **Rebalancing**: fixed 50/30/20 target weights (overridable), signed
//!   buy/sell amounts per category
//! - **Write-through ledger**: every edit is persisted before it becomes
//!   visible; a failed write leaves nothing half-applied
//! - **Pluggable storage**: any text key-value store behind [`KeyValueStore`]
//!
//! ## Quick Start
//!
//! ```
//! use nanofolio::{Category, HoldingRecord, aggregate, rebalance};
//!
//! let holdings = [
//!     HoldingRecord::new(Category::Stock, "x", 5_000_000.0),
//!     HoldingRecord::new(Category::Commodity, "y", 2_000_000.0),
//!     HoldingRecord::new(Category::Bond, "z", 1_000_000.0),
//! ];
//!
//! let totals = aggregate(&holdings);
//! assert_eq!(totals.total(), 8_000_000.0);
//!
//! let result = rebalance(&totals);
//! assert_eq!(result.ideal.stock, 4_000_000.0);
//! assert_eq!(result.operation.stock, -1_000_000.0);  // sell
//! assert_eq!(result.operation.commodity, 400_000.0); // buy
//! ```
//!
//! ## Categories
//!
//! | Category | Wire name | Target weight |
//! |----------|-----------|---------------|
//! | Stocks, credit, real estate | `stock` | 0.5 |
//! | Commodities | `commodity` | 0.3 |
//! | Government bonds, cash | `bond` | 0.2 |
//!
//! ## Ledger
//!
//! ```
//! use nanofolio::{Category, HoldingRecord, Ledger, MemoryStore};
//!
//! let mut ledger = Ledger::open(MemoryStore::new());
//! ledger.add().unwrap();
//! ledger.add().unwrap();
//! ledger.update(1, HoldingRecord::new(Category::Commodity, "GLD", 300.0)).unwrap();
//! ledger.remove(0).unwrap();
//!
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(ledger.result().ideal.commodity, 90.0);
//!
//! // The stored snapshot matches what is in memory.
//! assert_eq!(ledger.load(), ledger.records());
//! ```

pub mod aggregate;
mod error;
pub mod file_store;
pub mod ledger;
pub mod rebalance;
pub mod snapshot;
pub mod store;
mod types;

// Re-export public API
pub use aggregate::aggregate;
pub use error::{Error, Result};
pub use file_store::FileStore;
pub use ledger::{Ledger, LedgerOptions};
pub use rebalance::{
    Action, BOND_WEIGHT, COMMODITY_WEIGHT, RebalanceResult, STOCK_WEIGHT, Weights, rebalance,
    rebalance_with,
};
pub use snapshot::SNAPSHOT_KEY;
pub use store::{KeyValueStore, MemoryStore};
pub use types::{Category, CategoryTotals, HoldingRecord, parse_amount};
