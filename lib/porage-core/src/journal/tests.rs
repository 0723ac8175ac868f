use std::path::Path;

use bytes::{BufMut, Bytes, BytesMut};

use super::*;
use crate::await_timeout;
use crate::config::JournalConfig;
use crate::test::with_temp_dir;

fn test_config(dir: &Path) -> JournalConfig {
    JournalConfig {
        storage_path: dir.join("journal"),
        group_commit_threshold: 2,
        group_commit_interval_ms: 20,
        ..JournalConfig::default()
    }
}

fn payload(ledger_id: u64, entry_id: i64) -> JournalEntryPayload {
    JournalEntryPayload::new(
        ledger_id,
        entry_id,
        Bytes::from(format!("entry-{ledger_id}-{entry_id}")),
    )
}

#[tokio::test]
async fn group_commit_triggered_by_threshold() {
    with_temp_dir(|dir| {
        let mut config = test_config(dir);
        // Make the timer irrelevant: only the threshold can commit.
        config.group_commit_interval_ms = 60_000;

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            let first = journal.append(payload(0, 0)).await.expect("append");
            let second = journal.append(payload(0, 1)).await.expect("append");

            await_timeout!(first, 5)
                .expect("notifier alive")
                .expect("commit succeeds");
            await_timeout!(second, 5)
                .expect("notifier alive")
                .expect("commit succeeds");

            journal.stop().await;
        }
    })
    .await;
}

#[tokio::test]
async fn group_commit_triggered_by_timer() {
    with_temp_dir(|dir| {
        let mut config = test_config(dir);
        // A single write never reaches the threshold.
        config.group_commit_threshold = 100;

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            let receiver = journal.append(payload(0, 0)).await.expect("append");
            await_timeout!(receiver, 5)
                .expect("notifier alive")
                .expect("commit succeeds");

            journal.stop().await;
        }
    })
    .await;
}

#[tokio::test]
async fn stop_commits_pending_writes() {
    with_temp_dir(|dir| {
        let mut config = test_config(dir);
        config.group_commit_threshold = 100;
        config.group_commit_interval_ms = 60_000;

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            let receiver = journal.append(payload(0, 0)).await.expect("append");
            journal.stop().await;

            await_timeout!(receiver, 5)
                .expect("notifier alive")
                .expect("pending write committed on stop");

            // The writer is gone; further appends must fail cleanly.
            let err = journal.append(payload(0, 1)).await.unwrap_err();
            assert!(matches!(err, LedgerError::JournalClosed));
        }
    })
    .await;
}

#[tokio::test]
async fn segment_rolls_past_soft_threshold() {
    with_temp_dir(|dir| {
        let mut config = test_config(dir);
        config.segment_soft_threshold = 1;
        config.group_commit_threshold = 1;

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            for entry_id in 0..3 {
                let receiver = journal.append(payload(0, entry_id)).await.expect("append");
                await_timeout!(receiver, 5)
                    .expect("notifier alive")
                    .expect("commit succeeds");
            }

            // Every commit exceeded the soft threshold and rolled.
            let segments = journal.segments().expect("list segments");
            assert_eq!(segments.len(), 4);
            let (_, last) = segments.last().expect("non-empty");
            assert_eq!(last, &journal.current_segment_path());

            journal.stop().await;
        }
    })
    .await;
}

#[tokio::test]
async fn read_segment_parses_frames_and_ignores_torn_tail() {
    with_temp_dir(|dir| {
        let segment = dir.join("1.journal");

        async move {
            let mut data = BytesMut::new();
            for entry_id in 0..2i64 {
                let entry = payload(3, entry_id);
                data.put_u64(entry.encoded_len() as u64);
                data.put_u64(100 + entry_id as u64);
                entry.encode(&mut data);
            }
            // A frame header that promises more bytes than the file holds,
            // as a crash mid-write would leave behind.
            data.put_u64(1024);
            data.put_u64(999);
            data.put_slice(b"partial");
            tokio::fs::write(&segment, &data).await.expect("write segment");

            let entries = read_segment(&segment).await.expect("read segment");
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].sequence_id, 100);
            assert_eq!(entries[0].payload, payload(3, 0));
            assert_eq!(entries[1].payload, payload(3, 1));
        }
    })
    .await;
}

#[tokio::test]
async fn min_flush_time_tracks_slowest_ledger() {
    with_temp_dir(|dir| {
        let config = test_config(dir);

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            journal.register_ledger(1);
            journal.register_ledger(2);
            assert_eq!(journal.shared.min_flush_time(), 0);

            // One ledger flushing does not unpin segments held by the other.
            journal.update_flush_time(1);
            assert_eq!(journal.shared.min_flush_time(), 0);

            journal.update_flush_time(2);
            assert!(journal.shared.min_flush_time() > 0);

            journal.deregister_ledger(1);
            journal.deregister_ledger(2);
            assert_eq!(journal.shared.min_flush_time(), 0);

            journal.stop().await;
        }
    })
    .await;
}

#[tokio::test]
async fn trim_removes_stale_segments() {
    with_temp_dir(|dir| {
        let mut config = test_config(dir);
        config.segment_soft_threshold = 1;
        config.group_commit_threshold = 1;
        config.trim_interval_s = 1;

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            for entry_id in 0..2 {
                let receiver = journal.append(payload(0, entry_id)).await.expect("append");
                await_timeout!(receiver, 5)
                    .expect("notifier alive")
                    .expect("commit succeeds");
            }
            assert!(journal.segments().expect("list segments").len() >= 3);

            journal.register_ledger(0);
            journal.update_flush_time(0);
            journal.enable_trimming();

            tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

            let segments = journal.segments().expect("list segments");
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].1, journal.current_segment_path());

            journal.stop().await;
        }
    })
    .await;
}

#[tokio::test]
async fn workers_are_listed_until_stopped() {
    with_temp_dir(|dir| {
        let config = test_config(dir);

        async move {
            let journal = Journal::start(config).await.expect("journal start");

            let mut names: Vec<_> = journal
                .worker_descriptions()
                .into_iter()
                .map(|worker| worker.name)
                .collect();
            names.sort();
            assert_eq!(names, ["journal_worker", "trim_worker"]);

            journal.stop().await;
            assert!(journal.worker_descriptions().is_empty());
        }
    })
    .await;
}
