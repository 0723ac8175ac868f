use std::collections::HashMap;

use parking_lot::RwLock;

use crate::entry::{EntryId, LedgerEntry};

/// Bounded in-memory cache of a ledger's most recent entries.
///
/// Entries are inserted by the write path before the journal commit resolves
/// and are evicted from the low end once the persistence task has made them
/// reachable through the index. Eviction is advisory: [`Memtable::trim_until`]
/// never removes an entry whose ID exceeds the bound supplied by the caller,
/// which the ledger sets to its last flushed entry ID.
pub(crate) struct Memtable {
    ledger_id: u64,
    trim_threshold: usize,
    inner: RwLock<Inner>,
}

struct Inner {
    entries: HashMap<EntryId, LedgerEntry>,
    /// Smallest entry ID still retained. Entries below this have been
    /// evicted; entries at or above it may or may not be present yet.
    min_entry_in_mem: EntryId,
}

impl Memtable {
    pub(crate) fn new(ledger_id: u64, trim_threshold: usize) -> Self {
        Self {
            ledger_id,
            trim_threshold,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                min_entry_in_mem: 0,
            }),
        }
    }

    pub(crate) fn put(&self, entry: LedgerEntry) {
        self.inner.write().entries.insert(entry.entry_id, entry);
    }

    pub(crate) fn get(&self, entry_id: EntryId) -> Option<LedgerEntry> {
        self.inner.read().entries.get(&entry_id).cloned()
    }

    /// True when the memtable has grown past its configured threshold.
    pub(crate) fn meets_trim_threshold(&self) -> bool {
        self.inner.read().entries.len() > self.trim_threshold
    }

    /// Evicts entries from the low end while the memtable is at or above its
    /// threshold, never evicting past `up_to_entry_id`.
    pub(crate) fn trim_until(&self, up_to_entry_id: EntryId) {
        let mut inner = self.inner.write();
        let mut evicted = 0u64;
        while inner.min_entry_in_mem <= up_to_entry_id && inner.entries.len() >= self.trim_threshold
        {
            let min = inner.min_entry_in_mem;
            inner.entries.remove(&min);
            inner.min_entry_in_mem += 1;
            evicted += 1;
        }
        if evicted > 0 {
            debug!(
                ledger_id = self.ledger_id,
                evicted,
                min_entry_in_mem = inner.min_entry_in_mem,
                "Trimmed memtable."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn entry(entry_id: EntryId) -> LedgerEntry {
        LedgerEntry::new(entry_id, Bytes::from(format!("payload-{entry_id}")))
    }

    #[test]
    fn put_then_get() {
        let memtable = Memtable::new(0, 16);
        memtable.put(entry(0));
        memtable.put(entry(1));

        assert_eq!(memtable.get(0), Some(entry(0)));
        assert_eq!(memtable.get(1), Some(entry(1)));
        assert_eq!(memtable.get(2), None);
    }

    #[test]
    fn threshold_is_strict() {
        let memtable = Memtable::new(0, 4);
        for id in 0..4 {
            memtable.put(entry(id));
        }
        assert!(!memtable.meets_trim_threshold());

        memtable.put(entry(4));
        assert!(memtable.meets_trim_threshold());
    }

    #[test]
    fn trim_stops_at_bound() {
        let memtable = Memtable::new(0, 4);
        for id in 0..8 {
            memtable.put(entry(id));
        }

        // Only entries up to ID 2 may be evicted.
        memtable.trim_until(2);
        assert_eq!(memtable.get(0), None);
        assert_eq!(memtable.get(2), None);
        assert_eq!(memtable.get(3), Some(entry(3)));
        assert_eq!(memtable.get(7), Some(entry(7)));
    }

    #[test]
    fn trim_stops_at_threshold() {
        let memtable = Memtable::new(0, 4);
        for id in 0..8 {
            memtable.put(entry(id));
        }

        // Everything is flushed, but eviction halts once the memtable is
        // back under its threshold.
        memtable.trim_until(7);
        assert_eq!(memtable.get(4), None);
        assert_eq!(memtable.get(5), Some(entry(5)));
        assert_eq!(memtable.get(7), Some(entry(7)));
    }
}
