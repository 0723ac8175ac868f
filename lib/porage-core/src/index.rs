use std::path::{Path, PathBuf};

use snafu::ResultExt;

use crate::config::IndexFileConfig;
use crate::entry::{EntryId, IndexValue};
use crate::error::{CorruptSnafu, IndexSnafu, IoSnafu, LedgerError};

/// Per-ledger durable ordered map from entry ID to the entry's location in
/// the entry log.
///
/// Keys are fixed-width big-endian `u64`, so byte order equals integer order
/// and the engine's reverse iteration yields the greatest entry ID directly.
pub(crate) struct Index {
    ledger_id: u64,
    path: PathBuf,
    db: sled::Db,
}

fn key(entry_id: EntryId) -> [u8; 8] {
    (entry_id as u64).to_be_bytes()
}

fn decode_key(raw: &[u8]) -> Result<EntryId, LedgerError> {
    let mut buf = [0u8; 8];
    if raw.len() != 8 {
        return crate::entry::DecodeSnafu {
            what: "index key",
            need: 8usize,
            have: raw.len(),
        }
        .fail()
        .context(CorruptSnafu);
    }
    buf.copy_from_slice(raw);
    Ok(u64::from_be_bytes(buf) as EntryId)
}

impl Index {
    pub(crate) fn open(
        dir: &Path,
        ledger_id: u64,
        config: &IndexFileConfig,
    ) -> Result<Self, LedgerError> {
        let path = dir.join(format!("ledger_{ledger_id}"));
        let db = sled::Config::new()
            .path(&path)
            .cache_capacity(config.memtable_size)
            .open()
            .context(IndexSnafu)?;
        Ok(Self {
            ledger_id,
            path,
            db,
        })
    }

    /// Records the location of a committed entry. Buffered; a batch of puts
    /// is made durable with one [`Index::sync`].
    pub(crate) fn put(&self, entry_id: EntryId, value: IndexValue) -> Result<(), LedgerError> {
        self.db
            .insert(key(entry_id), &value.encode()[..])
            .context(IndexSnafu)?;
        Ok(())
    }

    pub(crate) fn get(&self, entry_id: EntryId) -> Result<Option<IndexValue>, LedgerError> {
        match self.db.get(key(entry_id)).context(IndexSnafu)? {
            Some(raw) => Ok(Some(IndexValue::decode(&raw).context(CorruptSnafu)?)),
            None => Ok(None),
        }
    }

    /// Greatest entry ID and its value, or `None` if the index is empty.
    pub(crate) fn last_item(&self) -> Result<Option<(EntryId, IndexValue)>, LedgerError> {
        match self.db.last().context(IndexSnafu)? {
            Some((raw_key, raw_value)) => {
                let entry_id = decode_key(&raw_key)?;
                let value = IndexValue::decode(&raw_value).context(CorruptSnafu)?;
                Ok(Some((entry_id, value)))
            }
            None => Ok(None),
        }
    }

    /// Durability barrier for every earlier [`Index::put`].
    pub(crate) fn sync(&self) -> Result<(), LedgerError> {
        self.db.flush().context(IndexSnafu)?;
        Ok(())
    }

    /// Removes the backing storage. The handle stays open until dropped; on
    /// unix the unlinked files disappear once it does.
    pub(crate) fn delete(&self) -> Result<(), LedgerError> {
        debug!(ledger_id = self.ledger_id, "Deleting index storage.");
        std::fs::remove_dir_all(&self.path).context(IoSnafu)
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use temp_dir::TempDir;

    use super::*;

    fn open(dir: &TempDir) -> Index {
        Index::open(dir.path(), 0, &IndexFileConfig::default()).expect("open index")
    }

    fn value(offset: u64) -> IndexValue {
        IndexValue { offset, size: 9 }
    }

    #[test]
    fn put_get_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let index = open(&dir);

        index.put(0, value(0)).expect("put");
        index.put(1, value(9)).expect("put");
        index.sync().expect("sync");

        assert_eq!(index.get(0).expect("get"), Some(value(0)));
        assert_eq!(index.get(1).expect("get"), Some(value(9)));
        assert_eq!(index.get(2).expect("get"), None);
    }

    #[test]
    fn last_item_uses_integer_order() {
        let dir = TempDir::new().expect("temp dir");
        let index = open(&dir);
        assert_eq!(index.last_item().expect("last item"), None);

        // Crosses the one-byte boundary where textual ordering would break.
        for entry_id in 0..300 {
            index
                .put(entry_id, value(entry_id as u64 * 9))
                .expect("put");
        }
        index.sync().expect("sync");

        let (entry_id, last) = index.last_item().expect("last item").expect("non-empty");
        assert_eq!(entry_id, 299);
        assert_eq!(last, value(299 * 9));
    }

    #[test]
    fn delete_removes_backing_dir() {
        let dir = TempDir::new().expect("temp dir");
        let index = open(&dir);
        index.put(0, value(0)).expect("put");
        index.sync().expect("sync");

        assert!(index.path().exists());
        index.delete().expect("delete");
        assert!(!index.path().exists());
    }
}
