//! Holdings ledger: the authoritative holdings list with write-through
//! persistence.
//!
//! Every mutation runs the same pipeline on a candidate copy of the list:
//!
//! 1. apply the edit (add / update / remove)
//! 2. re-aggregate category totals from scratch
//! 3. rebalance against the configured weights
//! 4. write the full snapshot to the store
//! 5. commit candidate and derived state
//!
//! If any step fails, nothing is committed: the in-memory list, derived
//! state and the stored snapshot all keep their previous values.
//!
//! ```
//! use nanofolio::{Category, HoldingRecord, Ledger, MemoryStore};
//!
//! let mut ledger = Ledger::open(MemoryStore::new());
//! let i = ledger.add().unwrap();
//! ledger.update(i, HoldingRecord::new(Category::Bond, "cash", 1000.0)).unwrap();
//!
//! assert_eq!(ledger.totals().bond, 1000.0);
//! assert_eq!(ledger.result().operation.stock, 500.0);
//! ```

use log::debug;

use crate::aggregate::aggregate;
use crate::error::{Error, Result};
use crate::rebalance::{RebalanceResult, Weights, rebalance_with};
use crate::snapshot::{self, SNAPSHOT_KEY};
use crate::store::KeyValueStore;
use crate::types::{CategoryTotals, HoldingRecord};

/// Settings for opening a [`Ledger`].
#[derive(Clone, Debug)]
pub struct LedgerOptions {
    /// Store key the snapshot lives under.
    pub key: String,
    /// Target weights used for rebalancing.
    pub weights: Weights,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            key: SNAPSHOT_KEY.to_string(),
            weights: Weights::DEFAULT,
        }
    }
}

/// Owns the holdings list, its derived totals and rebalance result, and the
/// store the list is persisted to.
#[derive(Debug)]
pub struct Ledger<S: KeyValueStore> {
    store: S,
    key: String,
    weights: Weights,
    records: Vec<HoldingRecord>,
    totals: CategoryTotals,
    result: RebalanceResult,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Open with the default key and weights, loading any stored snapshot.
    pub fn open(store: S) -> Self {
        Self::open_with(store, LedgerOptions::default())
    }

    /// Open with the default key and custom weights.
    pub fn with_weights(store: S, weights: Weights) -> Self {
        Self::open_with(
            store,
            LedgerOptions {
                weights,
                ..LedgerOptions::default()
            },
        )
    }

    pub fn open_with(store: S, options: LedgerOptions) -> Self {
        let mut ledger = Self {
            store,
            key: options.key,
            weights: options.weights,
            records: Vec::new(),
            totals: CategoryTotals::ZERO,
            result: RebalanceResult::default(),
        };
        ledger.records = ledger.load();
        ledger.totals = aggregate(&ledger.records);
        ledger.result = rebalance_with(&ledger.totals, &ledger.weights);
        debug!(
            "ledger opened with {} holdings from '{}'",
            ledger.records.len(),
            ledger.key
        );
        ledger
    }

    /// Read the stored snapshot.
    ///
    /// Missing or malformed data yields an empty list; this never fails.
    pub fn load(&self) -> Vec<HoldingRecord> {
        snapshot::load_or_empty(&self.store, &self.key)
    }

    /// Write the current holdings to the store.
    pub fn persist(&mut self) -> Result<()> {
        snapshot::save(&mut self.store, &self.key, &self.records)
    }

    // === Queries ===

    pub fn records(&self) -> &[HoldingRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HoldingRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Category totals of the current holdings.
    pub fn totals(&self) -> &CategoryTotals {
        &self.totals
    }

    /// Rebalance result for the current holdings.
    pub fn result(&self) -> &RebalanceResult {
        &self.result
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // === Mutations ===

    /// Append a default holding (stock, empty label, zero amount).
    ///
    /// Returns the index of the new holding.
    pub fn add(&mut self) -> Result<usize> {
        self.push(HoldingRecord::default())
    }

    /// Append `record` with a single write.
    ///
    /// Returns the index of the new holding. A non-finite amount is rejected
    /// without touching any state.
    pub fn push(&mut self, record: HoldingRecord) -> Result<usize> {
        check_amount(&record)?;
        let mut candidate = self.records.clone();
        candidate.push(record);
        let index = candidate.len() - 1;
        self.commit(candidate)?;
        debug!("added holding #{index}");
        Ok(index)
    }

    /// Replace the holding at `index` with `record` in full.
    ///
    /// Rejects out-of-range indices and non-finite amounts, in that order,
    /// without touching any state.
    pub fn update(&mut self, index: usize, record: HoldingRecord) -> Result<()> {
        self.check_index(index)?;
        check_amount(&record)?;
        let mut candidate = self.records.clone();
        candidate[index] = record;
        self.commit(candidate)?;
        debug!("updated holding #{index}");
        Ok(())
    }

    /// Delete the holding at `index`, shifting later holdings left.
    ///
    /// Returns the removed holding.
    pub fn remove(&mut self, index: usize) -> Result<HoldingRecord> {
        self.check_index(index)?;
        let mut candidate = self.records.clone();
        let removed = candidate.remove(index);
        self.commit(candidate)?;
        debug!("removed holding #{index} ({})", removed.label);
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    /// Recompute, persist, then swap in.
    fn commit(&mut self, candidate: Vec<HoldingRecord>) -> Result<()> {
        let totals = aggregate(&candidate);
        let result = rebalance_with(&totals, &self.weights);
        snapshot::save(&mut self.store, &self.key, &candidate)?;
        self.records = candidate;
        self.totals = totals;
        self.result = result;
        Ok(())
    }
}

fn check_amount(record: &HoldingRecord) -> Result<()> {
    if !record.amount.is_finite() {
        return Err(Error::InvalidAmount(format!(
            "amount {} is not finite",
            record.amount
        )));
    }
    Ok(())
}
