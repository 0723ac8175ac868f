//! Process-wide write-ahead journal.
//!
//! A single current segment file receives framed entries from every ledger.
//! The writer task groups pending writes into one `fsync` per batch and
//! rotates the segment once it grows past a soft threshold; the trim task
//! deletes non-current segments once every registered ledger has durably
//! indexed past their creation time. Segment files are named
//! `<unix_nano>.journal`, so filename order equals creation order.
//!
//! On-disk frame format, all integers big-endian:
//! `size(u64) ‖ sequence_id(u64) ‖ payload(size bytes)` where the payload is
//! a serialized [`JournalEntryPayload`].

mod trim;
mod writer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::{Buf, Bytes};
use parking_lot::{Mutex, RwLock};
use snafu::ResultExt;
use tokio::sync::{mpsc, oneshot};

use crate::config::JournalConfig;
use crate::entry::JournalEntryPayload;
use crate::error::{CorruptSnafu, IoSnafu, LedgerError};
use crate::worker::{WorkerDescription, WorkerHandle};

const SEGMENT_SUFFIX: &str = "journal";
const FRAME_HEADER_LEN: usize = 16;

/// One framed record read back from a segment during recovery.
#[derive(Debug)]
pub(crate) struct JournalEntry {
    #[allow(dead_code)]
    pub(crate) sequence_id: u64,
    pub(crate) payload: JournalEntryPayload,
}

/// Commit acknowledgement delivered once the entry's group commit completes.
pub type CommitReceiver = oneshot::Receiver<Result<(), LedgerError>>;

pub(crate) struct WriteRequest {
    pub(crate) entry: JournalEntryPayload,
    pub(crate) notify: oneshot::Sender<Result<(), LedgerError>>,
}

/// Wall clock in nanoseconds since the epoch. Sequence IDs, segment names,
/// and ledger flush times all come from this source, which is what makes the
/// trim comparison meaningful.
pub(crate) fn unix_timestamp_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

fn segment_path(dir: &Path, timestamp: u64) -> PathBuf {
    dir.join(format!("{timestamp}.{SEGMENT_SUFFIX}"))
}

/// State shared between the journal handle and its background tasks.
pub(crate) struct JournalShared {
    /// Last flush time (unix nanos) per registered ledger.
    ledgers: RwLock<HashMap<u64, u64>>,
    /// Set once recovery completes; the trim task is inert until then.
    trim_enabled: AtomicBool,
    current_segment: RwLock<PathBuf>,
}

impl JournalShared {
    /// Minimum flush time across registered ledgers, 0 when none is
    /// registered. A zero keeps every segment retained.
    pub(crate) fn min_flush_time(&self) -> u64 {
        self.ledgers.read().values().copied().min().unwrap_or(0)
    }

    pub(crate) fn trim_enabled(&self) -> bool {
        self.trim_enabled.load(Ordering::Acquire)
    }

    pub(crate) fn current_segment(&self) -> PathBuf {
        self.current_segment.read().clone()
    }

    pub(crate) fn set_current_segment(&self, path: PathBuf) {
        *self.current_segment.write() = path;
    }
}

/// Handle to the process-wide journal.
///
/// Explicitly constructed and owned by the server; ledgers hold an `Arc` and
/// interact through [`Journal::append`] and the registration methods.
pub struct Journal {
    config: JournalConfig,
    write_tx: mpsc::Sender<WriteRequest>,
    shared: Arc<JournalShared>,
    workers: Mutex<Vec<WorkerHandle>>,
}

impl Journal {
    /// Creates the storage directory and a fresh current segment, then
    /// spawns the writer and trim tasks.
    ///
    /// The fresh segment means every segment left behind by a previous
    /// process is a non-current segment, and therefore visible to recovery.
    pub async fn start(config: JournalConfig) -> Result<Arc<Self>, LedgerError> {
        tokio::fs::create_dir_all(&config.storage_path)
            .await
            .context(IoSnafu)?;

        let current_path = segment_path(&config.storage_path, unix_timestamp_nanos());
        let current_file = tokio::fs::File::create(&current_path)
            .await
            .context(IoSnafu)?;
        debug!(segment = %current_path.display(), "Opened journal segment.");

        let shared = Arc::new(JournalShared {
            ledgers: RwLock::new(HashMap::new()),
            trim_enabled: AtomicBool::new(false),
            current_segment: RwLock::new(current_path.clone()),
        });

        let (write_tx, write_rx) = mpsc::channel(config.message_buffer_size.max(1));

        let (mut writer_handle, writer_stop) = WorkerHandle::new(
            "journal_worker",
            "Write the journal entries and group commit them",
        );
        writer_handle.attach(tokio::spawn(writer::run(
            writer::WriterTask::new(&config, Arc::clone(&shared), current_file),
            write_rx,
            writer_stop,
        )));

        let (mut trim_handle, trim_stop) =
            WorkerHandle::new("trim_worker", "Trim the journal segments");
        trim_handle.attach(tokio::spawn(trim::run(
            trim::TrimTask::new(&config, Arc::clone(&shared)),
            trim_stop,
        )));

        Ok(Arc::new(Self {
            config,
            write_tx,
            shared,
            workers: Mutex::new(vec![writer_handle, trim_handle]),
        }))
    }

    /// Submits an entry for journaling and returns the receiver that
    /// resolves once the entry's group commit completes (or fails).
    ///
    /// Fails fast with [`LedgerError::BufferBusy`] when the writer's input
    /// channel is above the configured busy threshold.
    pub async fn append(&self, entry: JournalEntryPayload) -> Result<CommitReceiver, LedgerError> {
        let queued = self.write_tx.max_capacity() - self.write_tx.capacity();
        if queued > self.config.message_buffer_busy_threshold {
            return Err(LedgerError::BufferBusy);
        }

        let (notify, receiver) = oneshot::channel();
        self.write_tx
            .send(WriteRequest { entry, notify })
            .await
            .map_err(|_| LedgerError::JournalClosed)?;
        Ok(receiver)
    }

    /// Registers a ledger with an initial flush time of 0, pinning every
    /// existing segment until the ledger reports its first flush.
    pub fn register_ledger(&self, ledger_id: u64) {
        self.shared.ledgers.write().insert(ledger_id, 0);
    }

    pub fn deregister_ledger(&self, ledger_id: u64) {
        self.shared.ledgers.write().remove(&ledger_id);
    }

    /// Called by a ledger after each successful flush; the stored value is
    /// the wall clock at the moment of the call.
    pub fn update_flush_time(&self, ledger_id: u64) {
        let now = unix_timestamp_nanos();
        if let Some(flush_time) = self.shared.ledgers.write().get_mut(&ledger_id) {
            *flush_time = now;
        }
    }

    /// Arms the trim task. Called once recovery has replayed every
    /// non-current segment.
    pub fn enable_trimming(&self) {
        self.shared.trim_enabled.store(true, Ordering::Release);
        debug!("Journal trimming enabled.");
    }

    /// Segment files sorted by creation timestamp, current segment included.
    pub(crate) fn segments(&self) -> Result<Vec<(u64, PathBuf)>, LedgerError> {
        list_segments(&self.config.storage_path)
    }

    pub(crate) fn current_segment_path(&self) -> PathBuf {
        self.shared.current_segment()
    }

    /// Introspection records for the journal's running workers.
    pub fn worker_descriptions(&self) -> Vec<WorkerDescription> {
        self.workers
            .lock()
            .iter()
            .filter_map(WorkerHandle::describe)
            .collect()
    }

    /// Stops the writer and trim tasks. The writer drains its input channel
    /// and commits every pending entry before acknowledging.
    pub async fn stop(&self) {
        let mut workers = std::mem::take(&mut *self.workers.lock());
        for worker in &mut workers {
            worker.stop().await;
        }
        info!("Journal stopped.");
    }
}

/// Segment files in `dir` sorted by their creation timestamp.
pub(crate) fn list_segments(dir: &Path) -> Result<Vec<(u64, PathBuf)>, LedgerError> {
    let mut segments = Vec::new();
    for dir_entry in std::fs::read_dir(dir).context(IoSnafu)? {
        let path = dir_entry.context(IoSnafu)?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(SEGMENT_SUFFIX) {
            continue;
        }
        match path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u64>().ok())
        {
            Some(timestamp) => segments.push((timestamp, path)),
            None => warn!(path = %path.display(), "Ignoring unparsable segment filename."),
        }
    }
    segments.sort_unstable_by_key(|(timestamp, _)| *timestamp);
    Ok(segments)
}

/// Reads every complete frame of a segment file.
///
/// A truncated final frame is tolerated and ignored: it can only be the tail
/// of a crashed process's current segment, written but never committed, so
/// no acknowledged entry is lost by skipping it.
pub(crate) async fn read_segment(path: &Path) -> Result<Vec<JournalEntry>, LedgerError> {
    let data = tokio::fs::read(path).await.context(IoSnafu)?;
    let mut buf = Bytes::from(data);

    let mut entries = Vec::new();
    loop {
        if buf.remaining() < FRAME_HEADER_LEN {
            break;
        }
        let size = u64::from_be_bytes(buf[..8].try_into().expect("slice is 8 bytes")) as usize;
        if buf.remaining() < FRAME_HEADER_LEN + size {
            break;
        }
        buf.advance(8);
        let sequence_id = buf.get_u64();
        let payload = JournalEntryPayload::decode(buf.split_to(size)).context(CorruptSnafu)?;
        entries.push(JournalEntry {
            sequence_id,
            payload,
        });
    }
    if buf.has_remaining() {
        debug!(
            path = %path.display(),
            trailing = buf.remaining(),
            "Ignoring truncated frame at segment tail."
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests;
