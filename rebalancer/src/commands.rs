//! Command handlers: open ledger → edit → show.
//!
//! Edits from the command line are merged over the current record here,
//! before the ledger sees them; the ledger itself only replaces whole
//! records.

use log::info;
use nanofolio::{Category, FileStore, HoldingRecord, KeyValueStore, Ledger, parse_amount};
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::Renderer;

/// Fields given on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub category: Option<Category>,
    pub label: Option<String>,
    pub amount: Option<String>,
}

impl RecordFields {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.label.is_none() && self.amount.is_none()
    }

    /// Overlay the given fields on `base`.
    ///
    /// The amount is parsed here so malformed input is rejected before the
    /// ledger is touched.
    pub fn merge_into(&self, base: HoldingRecord) -> Result<HoldingRecord> {
        let amount = match &self.amount {
            Some(text) => parse_amount(text)?,
            None => base.amount,
        };
        Ok(HoldingRecord {
            category: self.category.unwrap_or(base.category),
            label: self.label.clone().unwrap_or(base.label),
            amount,
        })
    }
}

/// Open the on-disk ledger described by `config`.
pub fn open_ledger(config: &Config) -> Result<Ledger<FileStore>> {
    let store = FileStore::open(config.store_dir())?;
    let ledger = Ledger::open_with(store, config.ledger_options()?);
    info!(
        "loaded {} holdings from {}",
        ledger.len(),
        config.store_dir().display()
    );
    Ok(ledger)
}

/// Append a holding with any given fields filled in over the defaults.
///
/// The merged record is written in one step. Returns the new holding's index.
pub fn add_holding<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    fields: &RecordFields,
) -> Result<usize> {
    let record = fields.merge_into(HoldingRecord::default())?;
    Ok(ledger.push(record)?)
}

/// Merge `fields` over the holding at `index` and store the result.
pub fn edit_holding<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    index: usize,
    fields: &RecordFields,
) -> Result<HoldingRecord> {
    let current = ledger
        .get(index)
        .cloned()
        .ok_or(nanofolio::Error::IndexOutOfRange {
            index,
            len: ledger.len(),
        })?;
    let record = fields.merge_into(current)?;
    ledger.update(index, record.clone())?;
    Ok(record)
}

/// Machine-readable view of the ledger for `show --json`.
#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    pub holdings: &'a [HoldingRecord],
    pub current: &'a nanofolio::CategoryTotals,
    pub total: f64,
    pub ideal: &'a nanofolio::CategoryTotals,
    pub operation: &'a nanofolio::CategoryTotals,
}

impl<'a> ShowReport<'a> {
    pub fn from_ledger<S: KeyValueStore>(ledger: &'a Ledger<S>) -> Self {
        Self {
            holdings: ledger.records(),
            current: ledger.totals(),
            total: ledger.totals().total(),
            ideal: &ledger.result().ideal,
            operation: &ledger.result().operation,
        }
    }
}

/// Render the rebalance summary (or JSON report) for a ledger.
pub fn render_show<S: KeyValueStore>(
    ledger: &Ledger<S>,
    config: &Config,
    json: bool,
) -> Result<String> {
    if json {
        let report = ShowReport::from_ledger(ledger);
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }
    let renderer = Renderer::new(&config.display);
    Ok(renderer.summary(ledger.totals(), ledger.result()))
}

// === Entry points used by the binary ===

pub fn show(config: &Config, json: bool) -> Result<()> {
    let ledger = open_ledger(config)?;
    print!("{}", render_show(&ledger, config, json)?);
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let ledger = open_ledger(config)?;
    print!("{}", Renderer::new(&config.display).holdings(ledger.records()));
    Ok(())
}

pub fn add(config: &Config, fields: &RecordFields) -> Result<()> {
    let mut ledger = open_ledger(config)?;
    let index = add_holding(&mut ledger, fields)?;
    info!("added holding #{index}");
    println!("Added #{index}.\n");
    print!("{}", render_show(&ledger, config, false)?);
    Ok(())
}

pub fn edit(config: &Config, index: usize, fields: &RecordFields) -> Result<()> {
    if fields.is_empty() {
        return Err(Error::Config(
            "nothing to change: pass --category, --label or --amount".into(),
        ));
    }
    let mut ledger = open_ledger(config)?;
    let record = edit_holding(&mut ledger, index, fields)?;
    info!("updated holding #{index}");
    println!(
        "Updated #{index}: {} {} {}\n",
        record.category,
        record.label,
        Renderer::new(&config.display).amount(record.amount)
    );
    print!("{}", render_show(&ledger, config, false)?);
    Ok(())
}

pub fn remove(config: &Config, index: usize, force: bool) -> Result<()> {
    let mut ledger = open_ledger(config)?;
    let target = ledger
        .get(index)
        .cloned()
        .ok_or(nanofolio::Error::IndexOutOfRange {
            index,
            len: ledger.len(),
        })?;

    if !force {
        let prompt = format!(
            "Remove #{index} ({} {})?",
            target.category,
            if target.label.is_empty() { "<unlabelled>" } else { target.label.as_str() }
        );
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !confirmed {
            return Err(Error::Aborted("nothing removed".into()));
        }
    }

    ledger.remove(index)?;
    info!("removed holding #{index}");
    println!("Removed #{index}.\n");
    print!("{}", render_show(&ledger, config, false)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanofolio::MemoryStore;

    #[test]
    fn merge_keeps_unset_fields() {
        let base = HoldingRecord::new(Category::Bond, "cash", 10.0);
        let fields = RecordFields {
            amount: Some("25".into()),
            ..Default::default()
        };
        let merged = fields.merge_into(base).unwrap();
        assert_eq!(merged, HoldingRecord::new(Category::Bond, "cash", 25.0));
    }

    #[test]
    fn merge_rejects_bad_amount() {
        let fields = RecordFields {
            amount: Some("twelve".into()),
            ..Default::default()
        };
        let err = fields.merge_into(HoldingRecord::default()).unwrap_err();
        assert!(err.is_rejected_input());
    }

    #[test]
    fn add_with_no_fields_writes_once() {
        let mut ledger = Ledger::open(MemoryStore::new());
        let i = add_holding(&mut ledger, &RecordFields::default()).unwrap();
        assert_eq!(i, 0);
        assert_eq!(ledger.store().writes(), 1);
    }

    #[test]
    fn add_with_fields_is_a_single_write() {
        let mut ledger = Ledger::open(MemoryStore::new().fail_after(1));
        let fields = RecordFields {
            category: Some(Category::Bond),
            label: Some("cash".into()),
            amount: Some("100".into()),
        };
        assert_eq!(add_holding(&mut ledger, &fields).unwrap(), 0);
        assert_eq!(ledger.store().writes(), 1);
        assert_eq!(
            ledger.records(),
            &[HoldingRecord::new(Category::Bond, "cash", 100.0)]
        );

        assert!(add_holding(&mut ledger, &fields).is_err());
        assert_eq!(ledger.len(), 1);
        let stored = ledger.store().get(ledger.key()).unwrap().unwrap();
        assert_eq!(
            stored,
            r#"[{"category":"bond","ticker":"cash","amount":100.0}]"#
        );
    }

    #[test]
    fn add_bad_amount_adds_nothing() {
        let mut ledger = Ledger::open(MemoryStore::new());
        let fields = RecordFields {
            amount: Some("NaN".into()),
            ..Default::default()
        };
        assert!(add_holding(&mut ledger, &fields).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn edit_out_of_range_is_rejected() {
        let mut ledger = Ledger::open(MemoryStore::new());
        let fields = RecordFields {
            label: Some("x".into()),
            ..Default::default()
        };
        let err = edit_holding(&mut ledger, 2, &fields).unwrap_err();
        assert!(err.is_rejected_input());
    }
}
