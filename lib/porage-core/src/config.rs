//! Configuration for the storage engine subsystems.
//!
//! Each struct maps to one section of the server's TOML configuration file.
//! Defaults are tuned for development; production deployments are expected
//! to provide every section explicitly.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Settings for the ledger marker directory.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LedgerConfig {
    /// Directory holding one empty marker file per persistent ledger.
    pub storage_path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data/ledgers"),
        }
    }
}

/// Settings for the process-wide write-ahead journal.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct JournalConfig {
    /// Directory holding journal segment files.
    pub storage_path: PathBuf,
    /// Size in bytes past which the current segment is rotated after a commit.
    pub segment_soft_threshold: u64,
    /// Capacity of the writer task's input channel.
    pub message_buffer_size: usize,
    /// Queued-request count past which appends fail fast with a busy error.
    pub message_buffer_busy_threshold: usize,
    /// Pending-write count that triggers a group commit.
    pub group_commit_threshold: usize,
    /// Milliseconds between timer-driven group commits.
    pub group_commit_interval_ms: u64,
    /// Seconds between trim passes over non-current segments.
    pub trim_interval_s: u64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data/journal"),
            segment_soft_threshold: 64 * 1024 * 1024,
            message_buffer_size: 1024,
            message_buffer_busy_threshold: 896,
            group_commit_threshold: 128,
            group_commit_interval_ms: 100,
            trim_interval_s: 60,
        }
    }
}

impl JournalConfig {
    pub fn group_commit_interval(&self) -> Duration {
        Duration::from_millis(self.group_commit_interval_ms)
    }

    pub fn trim_interval(&self) -> Duration {
        Duration::from_secs(self.trim_interval_s)
    }
}

/// Settings for the per-ledger memtable.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MemtableConfig {
    /// Entry count past which the memtable trims already-indexed entries.
    pub trim_threshold: usize,
}

impl Default for MemtableConfig {
    fn default() -> Self {
        Self {
            trim_threshold: 100_000,
        }
    }
}

/// Settings for the per-ledger entry log and its persistence task.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EntryLoggerConfig {
    /// Directory holding one `ledger_<id>.logger` file per ledger.
    pub storage_path: PathBuf,
    /// Capacity of the persistence task's input channel.
    pub message_buffer_size: usize,
    /// Queued-entry count past which the channel is considered busy.
    pub message_buffer_busy_threshold: usize,
    /// Appended-entry count that triggers a flush.
    pub flush_rate: u64,
    /// Seconds between timer-driven flushes.
    pub flush_interval_s: u64,
}

impl Default for EntryLoggerConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data/entrylogs"),
            message_buffer_size: 1024,
            message_buffer_busy_threshold: 896,
            flush_rate: 256,
            flush_interval_s: 5,
        }
    }
}

impl EntryLoggerConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_s)
    }
}

/// Settings for the per-ledger index engine.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct IndexFileConfig {
    /// Directory holding one `ledger_<id>` index tree per ledger.
    pub storage_path: PathBuf,
    /// In-memory cache budget for the index engine, in bytes.
    pub memtable_size: u64,
}

impl Default for IndexFileConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data/index"),
            memtable_size: 8 * 1024 * 1024,
        }
    }
}

/// Aggregated storage engine configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    pub ledger: LedgerConfig,
    pub journal: JournalConfig,
    pub memtable: MemtableConfig,
    pub entry_logger: EntryLoggerConfig,
    pub index_file: IndexFileConfig,
}

impl StorageConfig {
    /// Rebases every storage path under `root`. Used by tests to isolate an
    /// engine instance inside a temporary directory.
    pub fn under_root(root: &std::path::Path) -> Self {
        let mut config = Self::default();
        config.ledger.storage_path = root.join("ledgers");
        config.journal.storage_path = root.join("journal");
        config.entry_logger.storage_path = root.join("entrylogs");
        config.index_file.storage_path = root.join("index");
        config
    }
}
