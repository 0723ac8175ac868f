//! Per-ledger state machine.
//!
//! A ledger wires the shared journal, its memtable, its entry log, and its
//! index together behind a single write path. An append journals the entry,
//! caches it in the memtable, and hands it to the ledger's persistence task,
//! which batches entry-log appends and periodically flushes them into the
//! index. Reads consult the memtable first and fall back to the index plus
//! a positional entry-log read.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use snafu::ResultExt;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval_at, Instant};

use crate::config::StorageConfig;
use crate::entry::{EntryId, IndexValue, JournalEntryPayload, LedgerEntry};
use crate::entry_log::EntryLog;
use crate::error::{IoSnafu, LedgerError};
use crate::index::Index;
use crate::journal::Journal;
use crate::memtable::Memtable;
use crate::worker::{StopListener, WorkerDescription, WorkerHandle};

fn marker_path(dir: &Path, ledger_id: u64) -> PathBuf {
    dir.join(format!("ledger_{ledger_id}"))
}

/// IDs of the ledgers persisted in the marker directory.
///
/// Called by recovery before any ledger is open.
pub(crate) fn persistent_ledger_ids(dir: &Path) -> Result<Vec<u64>, LedgerError> {
    let mut ledger_ids = Vec::new();
    for dir_entry in std::fs::read_dir(dir).context(IoSnafu)? {
        let path = dir_entry.context(IoSnafu)?.path();
        let parsed = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix("ledger_"))
            .and_then(|id| id.parse::<u64>().ok());
        match parsed {
            Some(ledger_id) => ledger_ids.push(ledger_id),
            None => warn!(path = %path.display(), "Ignoring unexpected file in ledger directory."),
        }
    }
    ledger_ids.sort_unstable();
    Ok(ledger_ids)
}

/// An open ledger.
pub struct Ledger {
    ledger_id: u64,
    /// Next entry ID. The mutex also pins the order in which concurrent
    /// appends reach the journal and the persistence channel, so journal
    /// replay reconstructs entries in ascending ID order.
    next_entry_id: Mutex<EntryId>,
    memtable: Memtable,
    entry_log: Arc<EntryLog>,
    index: Arc<Index>,
    last_flushed_entry_id: Arc<AtomicI64>,
    write_tx: mpsc::Sender<LedgerEntry>,
    journal: Arc<Journal>,
    marker_path: PathBuf,
    worker: parking_lot::Mutex<Option<WorkerHandle>>,
}

impl Ledger {
    /// Opens (or creates) the ledger's backing storage, persists its marker
    /// file, spawns the persistence task, and registers the ledger with the
    /// journal.
    pub async fn open(
        ledger_id: u64,
        config: &StorageConfig,
        journal: Arc<Journal>,
    ) -> Result<Arc<Self>, LedgerError> {
        let entry_log = Arc::new(EntryLog::open(
            &config.entry_logger.storage_path,
            ledger_id,
        )?);
        let index = Arc::new(Index::open(
            &config.index_file.storage_path,
            ledger_id,
            &config.index_file,
        )?);
        let memtable = Memtable::new(ledger_id, config.memtable.trim_threshold);
        let last_flushed_entry_id = Arc::new(AtomicI64::new(-1));

        let marker_path = marker_path(&config.ledger.storage_path, ledger_id);
        let marker = tokio::fs::File::create(&marker_path)
            .await
            .context(IoSnafu)?;
        marker.sync_all().await.context(IoSnafu)?;

        let (write_tx, write_rx) = mpsc::channel(config.entry_logger.message_buffer_size.max(1));

        let (mut worker, stop) = WorkerHandle::new(
            format!("ledger-{ledger_id}-persistence-worker"),
            format!("Ledger {ledger_id} persistence worker"),
        );
        worker.attach(tokio::spawn(run_persistence(
            PersistenceTask {
                ledger_id,
                entry_log: Arc::clone(&entry_log),
                index: Arc::clone(&index),
                last_flushed_entry_id: Arc::clone(&last_flushed_entry_id),
                journal: Arc::clone(&journal),
                flush_rate: config.entry_logger.flush_rate.max(1),
                flush_interval: config.entry_logger.flush_interval(),
            },
            write_rx,
            stop,
        )));

        journal.register_ledger(ledger_id);

        Ok(Arc::new(Self {
            ledger_id,
            next_entry_id: Mutex::new(0),
            memtable,
            entry_log,
            index,
            last_flushed_entry_id,
            write_tx,
            journal,
            marker_path,
            worker: parking_lot::Mutex::new(Some(worker)),
        }))
    }

    pub fn ledger_id(&self) -> u64 {
        self.ledger_id
    }

    /// Appends a payload and returns its assigned entry ID once the journal
    /// has durably committed it.
    ///
    /// The ID counter, the journal submission, the memtable insert, and the
    /// persistence enqueue all happen under the counter mutex; only the
    /// commit notification is awaited outside it. A rejected journal
    /// submission (busy or shut down) does not consume an ID, so successful
    /// appends always form a dense sequence.
    pub async fn put_entry(&self, payload: Bytes) -> Result<EntryId, LedgerError> {
        let (entry_id, notification) = {
            let mut next_entry_id = self.next_entry_id.lock().await;
            let entry_id = *next_entry_id;

            let journal_entry =
                JournalEntryPayload::new(self.ledger_id, entry_id, payload.clone());
            let notification = self.journal.append(journal_entry).await?;
            *next_entry_id = entry_id + 1;

            let entry = LedgerEntry::new(entry_id, payload);
            self.memtable.put(entry.clone());
            self.write_tx
                .send(entry)
                .await
                .map_err(|_| LedgerError::LedgerClosed {
                    ledger_id: self.ledger_id,
                })?;

            (entry_id, notification)
        };

        match notification.await {
            Ok(committed) => committed?,
            Err(_) => return Err(LedgerError::JournalClosed),
        }

        if self.memtable.meets_trim_threshold() {
            self.memtable
                .trim_until(self.last_flushed_entry_id.load(Ordering::Acquire));
        }

        Ok(entry_id)
    }

    /// Looks the entry up in the memtable, then through the index and a
    /// positional entry-log read. `None` means the entry does not exist.
    pub fn get_entry(&self, entry_id: EntryId) -> Result<Option<LedgerEntry>, LedgerError> {
        if entry_id < 0 {
            return Ok(None);
        }
        if let Some(entry) = self.memtable.get(entry_id) {
            return Ok(Some(entry));
        }
        let Some(location) = self.index.get(entry_id)? else {
            return Ok(None);
        };
        let entry = self.entry_log.read(location.offset, location.size)?;
        Ok(Some(entry))
    }

    /// Number of indexed entries: one more than the greatest indexed entry
    /// ID, or 0 for an empty ledger.
    pub fn length(&self) -> Result<u64, LedgerError> {
        Ok(self
            .index
            .last_item()?
            .map(|(entry_id, _)| (entry_id + 1) as u64)
            .unwrap_or(0))
    }

    /// Reinstates an entry from the journal during recovery.
    ///
    /// Mirrors [`Ledger::put_entry`] minus the journal append: the entry is
    /// already durable in a journal segment, so it only needs to re-enter
    /// the memtable and the persistence pipeline.
    pub(crate) async fn put_entry_on_recovery(&self, payload: Bytes) -> Result<(), LedgerError> {
        let entry = {
            let mut next_entry_id = self.next_entry_id.lock().await;
            let entry_id = *next_entry_id;
            *next_entry_id = entry_id + 1;
            LedgerEntry::new(entry_id, payload)
        };

        self.memtable.put(entry.clone());
        self.write_tx
            .send(entry)
            .await
            .map_err(|_| LedgerError::LedgerClosed {
                ledger_id: self.ledger_id,
            })?;

        if self.memtable.meets_trim_threshold() {
            self.memtable
                .trim_until(self.last_flushed_entry_id.load(Ordering::Acquire));
        }
        Ok(())
    }

    /// Reconciles the entry log against the index: cuts any unindexed tail
    /// and seeds the ID counter after the last indexed entry. Returns the
    /// next expected entry ID, which recovery uses as its replay floor.
    pub(crate) async fn prepare_recovery(&self) -> Result<EntryId, LedgerError> {
        let Some((last_entry_id, location)) = self.index.last_item()? else {
            return Ok(0);
        };

        let valid_len = location.offset + location.size;
        self.entry_log.truncate(valid_len)?;
        *self.next_entry_id.lock().await = last_entry_id + 1;
        self.last_flushed_entry_id
            .store(last_entry_id, Ordering::Release);

        info!(
            ledger_id = self.ledger_id,
            last_entry_id, valid_len, "Prepared ledger for journal replay."
        );
        Ok(last_entry_id + 1)
    }

    /// Stops the persistence task. The task drains its channel and performs
    /// a final flush before acknowledging, so every accepted write is
    /// indexed when this returns.
    pub async fn stop(&self) {
        let worker = self.worker.lock().take();
        if let Some(mut worker) = worker {
            worker.stop().await;
            debug!(ledger_id = self.ledger_id, "Ledger stopped.");
        }
    }

    /// Irrevocably deletes the ledger: stops the persistence task, then
    /// removes the marker file, the entry log, and the index, and finally
    /// deregisters from the journal. The first failure aborts the sequence.
    pub async fn close(&self) -> Result<(), LedgerError> {
        self.stop().await;
        tokio::fs::remove_file(&self.marker_path)
            .await
            .context(IoSnafu)?;
        self.entry_log.delete()?;
        self.index.delete()?;
        self.journal.deregister_ledger(self.ledger_id);
        info!(ledger_id = self.ledger_id, "Closed ledger.");
        Ok(())
    }

    /// Introspection record for the persistence task while it is running.
    pub fn worker_description(&self) -> Option<WorkerDescription> {
        self.worker.lock().as_ref().and_then(WorkerHandle::describe)
    }

    #[cfg(test)]
    pub(crate) fn last_flushed(&self) -> EntryId {
        self.last_flushed_entry_id.load(Ordering::Acquire)
    }

    /// Kills the persistence task without its final flush, simulating a
    /// crash between journal acknowledgement and indexing.
    #[cfg(test)]
    pub(crate) fn abandon(&self) {
        if let Some(mut worker) = self.worker.lock().take() {
            worker.abort();
        }
    }
}

/// State owned by a ledger's persistence task.
struct PersistenceTask {
    ledger_id: u64,
    entry_log: Arc<EntryLog>,
    index: Arc<Index>,
    last_flushed_entry_id: Arc<AtomicI64>,
    journal: Arc<Journal>,
    flush_rate: u64,
    flush_interval: Duration,
}

impl PersistenceTask {
    /// Appends one entry to the entry log. Failures are logged and skipped
    /// so one poisoned entry does not stall the ledger.
    fn append(&self, entry: &LedgerEntry) -> bool {
        match self.entry_log.write(entry) {
            Ok(()) => true,
            Err(error) => {
                error!(
                    ledger_id = self.ledger_id,
                    entry_id = entry.entry_id,
                    %error,
                    "Failed to append entry to entry log."
                );
                false
            }
        }
    }

    /// Syncs the entry log and promotes the drained metadata into the
    /// index. `last_flushed_entry_id` and the journal flush time advance
    /// only after the index batch is durable.
    ///
    /// On an index failure the un-promoted metadata is put back for the
    /// next flush attempt rather than dropped.
    fn flush(&self) -> Result<(), LedgerError> {
        let drained = match self.entry_log.flush() {
            Ok(drained) => drained,
            Err(error) => {
                error!(ledger_id = self.ledger_id, %error, "Failed to sync entry log.");
                return Err(error);
            }
        };
        if drained.is_empty() {
            return Ok(());
        }

        for (position, metadata) in drained.iter().enumerate() {
            let location = IndexValue {
                offset: metadata.offset,
                size: metadata.size,
            };
            if let Err(error) = self.index.put(metadata.entry_id, location) {
                error!(
                    ledger_id = self.ledger_id,
                    entry_id = metadata.entry_id,
                    %error,
                    "Failed to write index entry; retaining metadata for retry."
                );
                self.entry_log.restore(drained[position..].to_vec());
                return Err(error);
            }
        }
        if let Err(error) = self.index.sync() {
            error!(ledger_id = self.ledger_id, %error, "Failed to sync index; retaining metadata for retry.");
            self.entry_log.restore(drained);
            return Err(error);
        }

        let newest = drained
            .iter()
            .map(|metadata| metadata.entry_id)
            .max()
            .expect("drained set is non-empty");
        self.last_flushed_entry_id
            .fetch_max(newest, Ordering::AcqRel);
        self.journal.update_flush_time(self.ledger_id);

        trace!(
            ledger_id = self.ledger_id,
            flushed = drained.len(),
            newest,
            "Flushed entries into index."
        );
        Ok(())
    }
}

async fn run_persistence(
    task: PersistenceTask,
    mut rx: mpsc::Receiver<LedgerEntry>,
    mut stop: StopListener,
) {
    let mut unflushed = 0u64;
    let mut timer = interval_at(
        Instant::now() + task.flush_interval,
        task.flush_interval,
    );

    loop {
        let mut should_flush = false;
        tokio::select! {
            maybe_entry = rx.recv() => match maybe_entry {
                Some(entry) => {
                    if task.append(&entry) {
                        unflushed += 1;
                        if unflushed >= task.flush_rate {
                            should_flush = true;
                        }
                    }
                }
                None => {
                    // The ledger handle is gone without a stop handshake.
                    let _ = task.flush();
                    return;
                }
            },
            _ = timer.tick() => {
                should_flush = true;
            }
            ack = stop.recv() => {
                while let Ok(entry) = rx.try_recv() {
                    task.append(&entry);
                }
                let _ = task.flush();
                debug!(ledger_id = task.ledger_id, "Ledger persistence worker stopped.");
                ack.acknowledge();
                return;
            }
        }

        // A failed flush keeps the counter and timer armed so the next
        // event retries it.
        if should_flush && task.flush().is_ok() {
            unflushed = 0;
            timer.reset();
        }
    }
}
