use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant};

use crate::config::JournalConfig;
use crate::worker::StopListener;

use super::{list_segments, JournalShared};

/// The journal trimmer: periodically deletes non-current segments whose
/// creation time lies strictly before every registered ledger's last flush
/// time. Such a segment is redundant because each entry it carries has been
/// durably indexed in its ledger.
pub(super) struct TrimTask {
    shared: Arc<JournalShared>,
    storage_path: PathBuf,
    trim_interval: Duration,
}

impl TrimTask {
    pub(super) fn new(config: &JournalConfig, shared: Arc<JournalShared>) -> Self {
        Self {
            shared,
            storage_path: config.storage_path.clone(),
            trim_interval: config.trim_interval(),
        }
    }

    async fn trim_once(&self) {
        let segments = match list_segments(&self.storage_path) {
            Ok(segments) => segments,
            Err(source) => {
                error!(%source, "Failed to list journal segments.");
                return;
            }
        };

        let current = self.shared.current_segment();
        let min_flush_time = self.shared.min_flush_time();

        for (timestamp, path) in segments {
            if path == current || timestamp >= min_flush_time {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => info!(segment = %path.display(), "Removed journal segment."),
                Err(source) => {
                    error!(segment = %path.display(), %source, "Failed to remove journal segment.");
                }
            }
        }
    }
}

pub(super) async fn run(task: TrimTask, mut stop: StopListener) {
    let mut timer = interval_at(
        Instant::now() + task.trim_interval,
        task.trim_interval,
    );

    loop {
        tokio::select! {
            _ = timer.tick() => {
                if task.shared.trim_enabled() {
                    task.trim_once().await;
                }
            }
            ack = stop.recv() => {
                info!("Journal trimmer stopped.");
                ack.acknowledge();
                return;
            }
        }
    }
}
