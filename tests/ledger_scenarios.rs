//! End-to-end ledger scenarios: edit pipeline, persistence across sessions,
//! error handling.

use nanofolio::{
    Category, CategoryTotals, Error, FileStore, HoldingRecord, KeyValueStore, Ledger,
    MemoryStore, SNAPSHOT_KEY,
};

fn x() -> HoldingRecord {
    HoldingRecord::new(Category::Stock, "x", 5_000_000.0)
}
fn y() -> HoldingRecord {
    HoldingRecord::new(Category::Commodity, "y", 2_000_000.0)
}
fn z() -> HoldingRecord {
    HoldingRecord::new(Category::Bond, "z", 1_000_000.0)
}

/// Build a ledger holding x, y, z through the public edit API.
fn three_holdings() -> Ledger<MemoryStore> {
    let mut ledger = Ledger::open(MemoryStore::new());
    for record in [x(), y(), z()] {
        let i = ledger.add().unwrap();
        ledger.update(i, record).unwrap();
    }
    ledger
}

// === Rebalance pipeline ===

#[test]
fn reference_portfolio() {
    let ledger = three_holdings();

    assert_eq!(
        *ledger.totals(),
        CategoryTotals::new(5_000_000.0, 2_000_000.0, 1_000_000.0)
    );
    assert_eq!(ledger.totals().total(), 8_000_000.0);

    let r = ledger.result();
    assert_eq!(r.ideal, CategoryTotals::new(4_000_000.0, 2_400_000.0, 1_600_000.0));
    assert_eq!(r.operation, CategoryTotals::new(-1_000_000.0, 400_000.0, 600_000.0));
}

#[test]
fn empty_ledger_is_all_zero() {
    let ledger = Ledger::open(MemoryStore::new());
    assert_eq!(*ledger.totals(), CategoryTotals::ZERO);
    assert_eq!(ledger.result().ideal, CategoryTotals::ZERO);
    assert_eq!(ledger.result().operation, CategoryTotals::ZERO);
}

// === Edits ===

#[test]
fn remove_middle_keeps_order() {
    let mut ledger = three_holdings();
    let removed = ledger.remove(1).unwrap();

    assert_eq!(removed, y());
    assert_eq!(ledger.records(), &[x(), z()]);
    assert_eq!(ledger.totals().commodity, 0.0);
}

#[test]
fn update_touches_only_target() {
    let mut ledger = three_holdings();
    let replacement = HoldingRecord::new(Category::Bond, "treasury", 250.0);
    ledger.update(1, replacement.clone()).unwrap();

    assert_eq!(ledger.records(), &[x(), replacement, z()]);
    assert_eq!(ledger.totals().commodity, 0.0);
    assert_eq!(ledger.totals().bond, 1_000_250.0);
}

#[test]
fn caller_side_merge() {
    let mut ledger = three_holdings();

    // Change only the amount: merge over the current record, then update.
    let merged = HoldingRecord {
        amount: 6_000_000.0,
        ..ledger.get(0).unwrap().clone()
    };
    ledger.update(0, merged).unwrap();

    assert_eq!(ledger.records()[0].label, "x");
    assert_eq!(ledger.totals().stock, 6_000_000.0);
}

#[test]
fn add_goes_to_end() {
    let mut ledger = three_holdings();
    let i = ledger.add().unwrap();
    assert_eq!(i, 3);
    assert_eq!(ledger.records()[3], HoldingRecord::default());
    // A zero-amount holding does not move anything.
    assert_eq!(ledger.totals().total(), 8_000_000.0);
}

#[test]
fn liability_reduces_ideal() {
    let mut ledger = three_holdings();
    let i = ledger.add().unwrap();
    ledger
        .update(i, HoldingRecord::new(Category::Bond, "mortgage", -3_000_000.0))
        .unwrap();

    assert_eq!(ledger.totals().total(), 5_000_000.0);
    assert_eq!(ledger.result().ideal.stock, 2_500_000.0);
    assert_eq!(ledger.result().operation.bond, 3_000_000.0);
}

// === Errors ===

#[test]
fn out_of_range_is_rejected_without_mutation() {
    let mut ledger = three_holdings();
    let writes = ledger.store().writes();

    assert!(matches!(
        ledger.update(3, HoldingRecord::default()),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(matches!(
        ledger.remove(7),
        Err(Error::IndexOutOfRange { index: 7, len: 3 })
    ));

    assert_eq!(ledger.records(), &[x(), y(), z()]);
    assert_eq!(ledger.store().writes(), writes);
}

#[test]
fn store_failure_is_atomic() {
    let store = three_holdings().into_store().fail_writes(true);
    let mut ledger = Ledger::open(store);
    let before = ledger.records().to_vec();
    let result_before = *ledger.result();

    assert!(matches!(ledger.remove(0), Err(Error::Store(_))));
    assert!(matches!(ledger.add(), Err(Error::Store(_))));

    assert_eq!(ledger.records(), before.as_slice());
    assert_eq!(*ledger.result(), result_before);
    assert_eq!(ledger.load(), before);
}

// === Persistence ===

#[test]
fn write_through_on_every_edit() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.add().unwrap();
    assert_eq!(ledger.load(), ledger.records());
    ledger.update(0, y()).unwrap();
    assert_eq!(ledger.load(), ledger.records());
    ledger.remove(0).unwrap();
    assert_eq!(ledger.load(), ledger.records());
    assert_eq!(ledger.store().writes(), 3);
}

#[test]
fn reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut ledger = Ledger::open(FileStore::open(dir.path()).unwrap());
        for record in [x(), y(), z()] {
            let i = ledger.add().unwrap();
            ledger.update(i, record).unwrap();
        }
        ledger.remove(2).unwrap();
    }

    let ledger = Ledger::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(ledger.records(), &[x(), y()]);
    assert_eq!(ledger.totals().total(), 7_000_000.0);
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(SNAPSHOT_KEY, "{\"truncated\": [").unwrap();

    let mut ledger = Ledger::open(store);
    assert!(ledger.is_empty());

    // The next edit overwrites the corrupt snapshot.
    ledger.add().unwrap();
    let reopened = Ledger::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.len(), 1);
}

#[test]
fn cleared_amount_survives_next_edit() {
    let store = MemoryStore::new().with_entry(
        SNAPSHOT_KEY,
        r#"[{"category":"stock","ticker":"VTI","amount":5000000},{"category":"bond","ticker":"cash","amount":null}]"#,
    );
    let mut ledger = Ledger::open(store);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.totals().stock, 5_000_000.0);
    assert_eq!(ledger.totals().bond, 0.0);

    ledger.add().unwrap();
    let reloaded = ledger.load();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded[0], HoldingRecord::new(Category::Stock, "VTI", 5_000_000.0));
    assert_eq!(reloaded[1], HoldingRecord::new(Category::Bond, "cash", 0.0));
}
