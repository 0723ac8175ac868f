use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant};

use crate::config::JournalConfig;
use crate::error::LedgerError;
use crate::worker::StopListener;

use super::{segment_path, unix_timestamp_nanos, JournalShared, WriteRequest};

/// The journal writer: frames incoming entries into the current segment and
/// group-commits them.
///
/// A commit is triggered when the pending set reaches the group commit
/// threshold or when the commit timer fires, whichever comes first; the
/// timer restarts after every commit. Sequence IDs are stamped at
/// frame-write time, so entries sharing one `fsync` boundary still carry
/// distinct, monotonically increasing IDs.
pub(super) struct WriterTask {
    shared: Arc<JournalShared>,
    storage_path: PathBuf,
    segment_soft_threshold: u64,
    group_commit_threshold: usize,
    group_commit_interval: Duration,
    segment: File,
    segment_written: u64,
    pending: Vec<oneshot::Sender<Result<(), LedgerError>>>,
}

impl WriterTask {
    pub(super) fn new(config: &JournalConfig, shared: Arc<JournalShared>, segment: File) -> Self {
        Self {
            shared,
            storage_path: config.storage_path.clone(),
            segment_soft_threshold: config.segment_soft_threshold,
            group_commit_threshold: config.group_commit_threshold.max(1),
            group_commit_interval: config.group_commit_interval(),
            segment,
            segment_written: 0,
            pending: Vec::new(),
        }
    }

    /// Stamps a sequence ID, frames the entry into the current segment, and
    /// parks the notifier until the next commit. A write failure is reported
    /// to that entry's notifier alone.
    async fn handle_request(&mut self, request: WriteRequest) {
        let sequence_id = unix_timestamp_nanos();
        let payload_len = request.entry.encoded_len();

        let mut frame = BytesMut::with_capacity(16 + payload_len);
        frame.put_u64(payload_len as u64);
        frame.put_u64(sequence_id);
        request.entry.encode(&mut frame);

        match self.segment.write_all(&frame).await {
            Ok(()) => {
                self.segment_written += frame.len() as u64;
                self.pending.push(request.notify);
            }
            Err(source) => {
                error!(
                    ledger_id = request.entry.ledger_id,
                    entry_id = request.entry.entry_id,
                    %source,
                    "Failed to write journal frame."
                );
                let _ = request.notify.send(Err(LedgerError::Io { source }));
            }
        }
    }

    /// Syncs the current segment and fans the outcome out to every pending
    /// notifier.
    async fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        match self.segment.sync_all().await {
            Ok(()) => {
                trace!(writes = self.pending.len(), "Journal group commit.");
                for notify in self.pending.drain(..) {
                    let _ = notify.send(Ok(()));
                }
            }
            Err(source) => {
                error!(%source, "Journal group commit failed.");
                let message = source.to_string();
                for notify in self.pending.drain(..) {
                    let _ = notify.send(Err(LedgerError::CommitFailed {
                        message: message.clone(),
                    }));
                }
            }
        }
    }

    /// Rolls to a fresh segment once the current one has grown past the soft
    /// threshold. Called after a commit, so everything acknowledged from the
    /// outgoing segment is already durable.
    async fn roll_segment_if_needed(&mut self) {
        if self.segment_written <= self.segment_soft_threshold {
            return;
        }

        let path = segment_path(&self.storage_path, unix_timestamp_nanos());
        match File::create(&path).await {
            Ok(file) => {
                info!(segment = %path.display(), "Rolled journal segment.");
                self.segment = file;
                self.segment_written = 0;
                self.shared.set_current_segment(path);
            }
            Err(source) => {
                // Keep writing to the oversized segment; rolling is retried
                // after the next commit.
                error!(%source, "Failed to create journal segment.");
            }
        }
    }

    async fn drain(&mut self, rx: &mut mpsc::Receiver<WriteRequest>) {
        while let Ok(request) = rx.try_recv() {
            self.handle_request(request).await;
        }
    }
}

pub(super) async fn run(
    mut task: WriterTask,
    mut rx: mpsc::Receiver<WriteRequest>,
    mut stop: StopListener,
) {
    let mut timer = interval_at(
        Instant::now() + task.group_commit_interval,
        task.group_commit_interval,
    );

    loop {
        let mut should_commit = false;
        tokio::select! {
            maybe_request = rx.recv() => match maybe_request {
                Some(request) => {
                    task.handle_request(request).await;
                    if task.pending.len() >= task.group_commit_threshold {
                        should_commit = true;
                    }
                }
                None => {
                    // The journal handle is gone; nothing more can arrive.
                    task.commit().await;
                    return;
                }
            },
            _ = timer.tick() => {
                should_commit = true;
            }
            ack = stop.recv() => {
                task.drain(&mut rx).await;
                task.commit().await;
                info!("Journal writer stopped.");
                ack.acknowledge();
                return;
            }
        }

        if should_commit {
            task.commit().await;
            task.roll_segment_if_needed().await;
            timer.reset();
        }
    }
}
