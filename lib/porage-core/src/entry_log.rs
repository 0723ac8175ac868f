use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;
use snafu::ResultExt;

use crate::entry::{EntryId, EntryMetadata, LedgerEntry};
use crate::error::{CorruptSnafu, IoSnafu, LedgerError};

/// Per-ledger append-only payload file.
///
/// Appends are issued only by the ledger's persistence task, so write state
/// is serialized by construction; the mutex makes that explicit rather than
/// relying on it. Durability is batched: writes land in the page cache and
/// [`EntryLog::flush`] syncs the file and drains the metadata accumulated
/// since the previous flush. Positional reads may run concurrently with
/// appends because they only touch already-written regions.
pub(crate) struct EntryLog {
    ledger_id: u64,
    path: PathBuf,
    file: File,
    write_state: Mutex<WriteState>,
}

struct WriteState {
    /// Offset the next append lands at. Tracked here so that record
    /// locations never depend on re-statting the file after a write.
    write_offset: u64,
    pending: Vec<EntryMetadata>,
}

fn file_path(dir: &Path, ledger_id: u64) -> PathBuf {
    dir.join(format!("ledger_{ledger_id}.logger"))
}

impl EntryLog {
    pub(crate) fn open(dir: &Path, ledger_id: u64) -> Result<Self, LedgerError> {
        let path = file_path(dir, ledger_id);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .context(IoSnafu)?;
        let write_offset = file.metadata().context(IoSnafu)?.len();

        Ok(Self {
            ledger_id,
            path,
            file,
            write_state: Mutex::new(WriteState {
                write_offset,
                pending: Vec::new(),
            }),
        })
    }

    /// Appends the serialized entry and records its location for the next
    /// flush. Not durable until [`EntryLog::flush`] is called.
    pub(crate) fn write(&self, entry: &LedgerEntry) -> Result<(), LedgerError> {
        let mut buf = BytesMut::new();
        entry.encode(&mut buf);
        let size = buf.len() as u64;

        let mut state = self.write_state.lock();
        (&self.file).write_all(&buf).context(IoSnafu)?;
        let offset = state.write_offset;
        state.write_offset += size;
        state.pending.push(EntryMetadata {
            entry_id: entry.entry_id,
            offset,
            size,
        });

        trace!(
            ledger_id = self.ledger_id,
            entry_id = entry.entry_id,
            offset,
            size,
            "Appended entry to entry log."
        );
        Ok(())
    }

    /// Positional read of a committed entry at a location taken from the
    /// index.
    pub(crate) fn read(&self, offset: u64, size: u64) -> Result<LedgerEntry, LedgerError> {
        let mut buf = vec![0u8; size as usize];
        self.file.read_exact_at(&mut buf, offset).context(IoSnafu)?;
        LedgerEntry::decode(Bytes::from(buf)).context(CorruptSnafu)
    }

    /// Syncs the file and drains the metadata of every append since the last
    /// flush. Must not run concurrently with [`EntryLog::write`]; the
    /// persistence task is the only caller of either.
    pub(crate) fn flush(&self) -> Result<Vec<EntryMetadata>, LedgerError> {
        self.file.sync_data().context(IoSnafu)?;
        let drained = std::mem::take(&mut self.write_state.lock().pending);
        Ok(drained)
    }

    /// Puts drained metadata back at the front of the pending list so a
    /// later flush retries the index promotion.
    pub(crate) fn restore(&self, metadata: Vec<EntryMetadata>) {
        let mut state = self.write_state.lock();
        let mut pending = metadata;
        pending.append(&mut state.pending);
        state.pending = pending;
    }

    /// Cuts the file back to `size` bytes. Recovery-only: discards the
    /// unindexed tail left behind by a crash.
    pub(crate) fn truncate(&self, size: u64) -> Result<(), LedgerError> {
        self.file.set_len(size).context(IoSnafu)?;
        let mut state = self.write_state.lock();
        state.write_offset = size;
        state.pending.clear();
        Ok(())
    }

    /// Unlinks the backing file.
    pub(crate) fn delete(&self) -> Result<(), LedgerError> {
        std::fs::remove_file(&self.path).context(IoSnafu)
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> std::io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

#[cfg(test)]
mod tests {
    use temp_dir::TempDir;

    use super::*;

    fn entry(entry_id: EntryId, payload: &'static [u8]) -> LedgerEntry {
        LedgerEntry::new(entry_id, Bytes::from_static(payload))
    }

    #[test]
    fn write_read_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let log = EntryLog::open(dir.path(), 0).expect("open entry log");

        log.write(&entry(0, b"first")).expect("write");
        log.write(&entry(1, b"second")).expect("write");
        let drained = log.flush().expect("flush");
        assert_eq!(drained.len(), 2);

        let first = log.read(drained[0].offset, drained[0].size).expect("read");
        assert_eq!(first, entry(0, b"first"));
        let second = log.read(drained[1].offset, drained[1].size).expect("read");
        assert_eq!(second, entry(1, b"second"));
    }

    #[test]
    fn flush_drains_pending_metadata() {
        let dir = TempDir::new().expect("temp dir");
        let log = EntryLog::open(dir.path(), 0).expect("open entry log");

        log.write(&entry(0, b"a")).expect("write");
        assert_eq!(log.flush().expect("flush").len(), 1);
        assert!(log.flush().expect("flush").is_empty());
    }

    #[test]
    fn restore_prepends_metadata() {
        let dir = TempDir::new().expect("temp dir");
        let log = EntryLog::open(dir.path(), 0).expect("open entry log");

        log.write(&entry(0, b"a")).expect("write");
        let drained = log.flush().expect("flush");
        log.write(&entry(1, b"b")).expect("write");
        log.restore(drained);

        let all = log.flush().expect("flush");
        assert_eq!(all.iter().map(|m| m.entry_id).collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn truncate_discards_tail() {
        let dir = TempDir::new().expect("temp dir");
        let log = EntryLog::open(dir.path(), 0).expect("open entry log");

        log.write(&entry(0, b"keep")).expect("write");
        let drained = log.flush().expect("flush");
        let keep = drained[0].offset + drained[0].size;
        log.write(&entry(1, b"discard")).expect("write");

        log.truncate(keep).expect("truncate");
        assert_eq!(log.len().expect("len"), keep);

        // Appends continue from the truncation point.
        log.write(&entry(1, b"again")).expect("write");
        let drained = log.flush().expect("flush");
        assert_eq!(drained[0].offset, keep);
        let reread = log.read(drained[0].offset, drained[0].size).expect("read");
        assert_eq!(reread, entry(1, b"again"));
    }

    #[test]
    fn delete_unlinks_file() {
        let dir = TempDir::new().expect("temp dir");
        let log = EntryLog::open(dir.path(), 7).expect("open entry log");
        assert!(log.path().exists());
        log.delete().expect("delete");
        assert!(!log.path().exists());
    }
}
