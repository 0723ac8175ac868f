//! Startup reconciliation of persistent ledgers against the journal.
//!
//! Recovery runs after the journal has opened its fresh current segment and
//! before the server accepts requests. Each persistent ledger is rebuilt
//! from its marker: the entry log is truncated back to the last indexed
//! boundary and the ID counter is seeded just past it. Every non-current
//! journal segment is then scanned in creation order, and entries at or
//! above a ledger's replay floor are pushed back through the normal
//! persistence pipeline. Replay is idempotent with respect to
//! already-indexed entries because of that floor.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use snafu::{ResultExt, Snafu};

use crate::control::LedgerControl;
use crate::entry::EntryId;
use crate::error::LedgerError;
use crate::journal;
use crate::ledger::{self, Ledger};

/// Fatal error during startup reconciliation; the process must not serve
/// requests after one of these.
#[derive(Debug, Snafu)]
pub enum RecoveryError {
    #[snafu(display("failed to scan ledger markers: {source}"))]
    ScanMarkers { source: LedgerError },

    #[snafu(display("failed to rebuild ledger {ledger_id}: {source}"))]
    RebuildLedger { ledger_id: u64, source: LedgerError },

    #[snafu(display("failed to list journal segments: {source}"))]
    ListSegments { source: LedgerError },

    #[snafu(display("failed to read journal segment {}: {source}", path.display()))]
    ReadSegment { path: PathBuf, source: LedgerError },

    #[snafu(display("failed to replay entry {entry_id} into ledger {ledger_id}: {source}"))]
    ReplayEntry {
        ledger_id: u64,
        entry_id: EntryId,
        source: LedgerError,
    },
}

/// Counters describing a completed recovery pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Ledgers rebuilt from marker files.
    pub ledgers: usize,
    /// Journal entries scanned across non-current segments.
    pub journal_entries: usize,
    /// Entries replayed into a ledger.
    pub recovered: usize,
    /// Entries skipped as already indexed or as belonging to no ledger.
    pub skipped: usize,
}

/// Rebuilds every persistent ledger, replays the journal, and arms the trim
/// task.
pub async fn recover(control: &LedgerControl) -> Result<RecoveryReport, RecoveryError> {
    info!("Recovering ledgers from journal.");
    let config = control.config();
    let journal = control.journal();

    let ledger_ids = ledger::persistent_ledger_ids(&config.ledger.storage_path)
        .context(ScanMarkersSnafu)?;

    let mut replay_targets: HashMap<u64, (Arc<Ledger>, EntryId)> = HashMap::new();
    for ledger_id in ledger_ids {
        let rebuilt = Ledger::open(ledger_id, config, Arc::clone(journal))
            .await
            .context(RebuildLedgerSnafu { ledger_id })?;
        let replay_floor = rebuilt
            .prepare_recovery()
            .await
            .context(RebuildLedgerSnafu { ledger_id })?;
        control.add_recovered(Arc::clone(&rebuilt)).await;
        replay_targets.insert(ledger_id, (rebuilt, replay_floor));
    }

    let mut report = RecoveryReport {
        ledgers: replay_targets.len(),
        ..RecoveryReport::default()
    };

    let current_segment = journal.current_segment_path();
    for (_, path) in journal.segments().context(ListSegmentsSnafu)? {
        if path == current_segment {
            continue;
        }
        let entries = journal::read_segment(&path)
            .await
            .context(ReadSegmentSnafu { path: path.clone() })?;

        for journal_entry in entries {
            report.journal_entries += 1;
            let payload = journal_entry.payload;

            let Some((target, replay_floor)) = replay_targets.get(&payload.ledger_id) else {
                report.skipped += 1;
                continue;
            };
            // The floor is fixed at recovery start; everything below it is
            // already reachable through the index.
            if payload.entry_id < *replay_floor {
                report.skipped += 1;
                continue;
            }

            target
                .put_entry_on_recovery(payload.payload)
                .await
                .context(ReplayEntrySnafu {
                    ledger_id: payload.ledger_id,
                    entry_id: payload.entry_id,
                })?;
            report.recovered += 1;
        }
    }

    journal.enable_trimming();
    info!(
        ledgers = report.ledgers,
        journal_entries = report.journal_entries,
        recovered = report.recovered,
        skipped = report.skipped,
        "Recovery complete."
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::config::StorageConfig;
    use crate::journal::Journal;
    use crate::test::{fast_storage_config, random_payload, with_temp_dir};

    async fn start_engine(config: &StorageConfig) -> (Arc<Journal>, LedgerControl) {
        let journal = Journal::start(config.journal.clone())
            .await
            .expect("journal start");
        let control = LedgerControl::start(config.clone(), Arc::clone(&journal))
            .await
            .expect("control start");
        (journal, control)
    }

    #[tokio::test]
    async fn recovery_of_empty_store_is_a_no_op() {
        with_temp_dir(|dir| {
            let config = fast_storage_config(dir);

            async move {
                let (journal, control) = start_engine(&config).await;
                let report = recover(&control).await.expect("recover");
                assert_eq!(report, RecoveryReport::default());
                journal.stop().await;
            }
        })
        .await;
    }

    #[tokio::test]
    async fn restart_preserves_indexed_entries_and_id_sequence() {
        with_temp_dir(|dir| {
            let config = fast_storage_config(dir);

            async move {
                let payloads: Vec<Bytes> = (0..100).map(|_| random_payload(24)).collect();

                {
                    let (journal, control) = start_engine(&config).await;
                    recover(&control).await.expect("recover");

                    control.create_ledger(7).await.expect("create ledger");
                    let ledger = control.get_ledger(7).await.expect("ledger exists");
                    for (entry_id, payload) in payloads.iter().enumerate() {
                        let assigned = ledger
                            .put_entry(payload.clone())
                            .await
                            .expect("put entry");
                        assert_eq!(assigned, entry_id as i64);
                    }

                    // Clean shutdown: final flush indexes everything.
                    control.shutdown().await;
                    journal.stop().await;
                }

                let (journal, control) = start_engine(&config).await;
                let report = recover(&control).await.expect("recover");
                assert_eq!(report.ledgers, 1);
                // Every journaled entry is already indexed.
                assert_eq!(report.recovered, 0);

                let ledger = control.get_ledger(7).await.expect("ledger recovered");
                assert_eq!(ledger.length().expect("length"), 100);
                for (entry_id, payload) in payloads.iter().enumerate() {
                    let entry = ledger
                        .get_entry(entry_id as i64)
                        .expect("get entry")
                        .expect("entry present");
                    assert_eq!(&entry.payload, payload);
                }

                // New appends continue the dense sequence.
                let assigned = ledger
                    .put_entry(random_payload(24))
                    .await
                    .expect("put entry");
                assert_eq!(assigned, 100);

                control.shutdown().await;
                journal.stop().await;
            }
        })
        .await;
    }

    #[tokio::test]
    async fn crash_before_flush_recovers_acknowledged_entries() {
        with_temp_dir(|dir| {
            let mut config = fast_storage_config(dir);
            // Make the persistence task inert so nothing reaches the index.
            config.entry_logger.flush_rate = u64::MAX;
            config.entry_logger.flush_interval_s = 3600;

            async move {
                let payloads: Vec<Bytes> = (0..20).map(|_| random_payload(24)).collect();

                {
                    let (journal, control) = start_engine(&config).await;
                    recover(&control).await.expect("recover");

                    control.create_ledger(1).await.expect("create ledger");
                    let ledger = control.get_ledger(1).await.expect("ledger exists");
                    for payload in &payloads {
                        ledger.put_entry(payload.clone()).await.expect("put entry");
                    }

                    // Crash: the persistence task dies without flushing, so
                    // the acknowledged entries exist only in the journal.
                    ledger.abandon();
                    journal.stop().await;
                }

                let (journal, control) = start_engine(&config).await;
                let report = recover(&control).await.expect("recover");
                assert_eq!(report.ledgers, 1);
                assert_eq!(report.recovered, 20);

                let ledger = control.get_ledger(1).await.expect("ledger recovered");
                for (entry_id, payload) in payloads.iter().enumerate() {
                    let entry = ledger
                        .get_entry(entry_id as i64)
                        .expect("get entry")
                        .expect("entry recovered");
                    assert_eq!(&entry.payload, payload);
                }

                // Recovered entries continue the sequence.
                let assigned = ledger
                    .put_entry(random_payload(24))
                    .await
                    .expect("put entry");
                assert_eq!(assigned, 20);

                control.shutdown().await;
                journal.stop().await;
            }
        })
        .await;
    }

    #[tokio::test]
    async fn closed_ledgers_are_not_resurrected() {
        with_temp_dir(|dir| {
            let config = fast_storage_config(dir);

            async move {
                {
                    let (journal, control) = start_engine(&config).await;
                    recover(&control).await.expect("recover");

                    control.create_ledger(4).await.expect("create ledger");
                    let ledger = control.get_ledger(4).await.expect("ledger exists");
                    ledger
                        .put_entry(random_payload(16))
                        .await
                        .expect("put entry");
                    control.remove_ledger(4).await.expect("remove ledger");

                    journal.stop().await;
                }

                let (journal, control) = start_engine(&config).await;
                let report = recover(&control).await.expect("recover");
                assert_eq!(report.ledgers, 0);
                // The journaled entry no longer has a ledger to land in.
                assert!(report.skipped >= 1);
                assert!(control.list_ledgers().await.is_empty());

                journal.stop().await;
            }
        })
        .await;
    }
}
