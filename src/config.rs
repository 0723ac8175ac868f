//! Server configuration.
//!
//! Loaded from a TOML file whose sections map one-to-one onto the structs
//! below. The storage sections are handed to the engine untouched; `[Log]`
//! and `[Server]` stay at the application layer.

use std::path::Path;

use porage_core::config::{
    EntryLoggerConfig, IndexFileConfig, JournalConfig, LedgerConfig, MemtableConfig, StorageConfig,
};
use serde::Deserialize;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("failed to read config file {}: {source}", path.display()))]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse config file {}: {source}", path.display()))]
    Parse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },
}

/// Logging settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// Filter directive seeding the subscriber, e.g. `info` or `porage=debug`.
    pub level: String,
    /// `stdout`, `stderr`, or a file path opened in append mode.
    pub output: String,
    /// Whether to emit ANSI color codes.
    pub with_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "stdout".to_string(),
            with_color: true,
        }
    }
}

/// Listener settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    /// Reserved for a future HTTP surface; nothing listens here today.
    pub port: u16,
    pub grpc_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 32900,
            grpc_port: 32901,
        }
    }
}

/// Complete server configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    #[serde(rename = "Ledger")]
    pub ledger: LedgerConfig,
    #[serde(rename = "Journal")]
    pub journal: JournalConfig,
    #[serde(rename = "Memtable")]
    pub memtable: MemtableConfig,
    #[serde(rename = "EntryLogger")]
    pub entry_logger: EntryLoggerConfig,
    #[serde(rename = "IndexFile")]
    pub index_file: IndexFileConfig,
    #[serde(rename = "Log")]
    pub log: LogConfig,
    #[serde(rename = "Server")]
    pub server: ServerConfig,
}

impl Config {
    /// Reads and deserializes the configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).context(ReadSnafu { path })?;
        toml::from_str(&raw).context(ParseSnafu { path })
    }

    /// The sections consumed by the storage engine.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            ledger: self.ledger.clone(),
            journal: self.journal.clone(),
            memtable: self.memtable.clone(),
            entry_logger: self.entry_logger.clone(),
            index_file: self.index_file.clone(),
        }
    }

    /// gRPC listener address.
    pub fn grpc_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.grpc_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section() {
        let raw = r#"
            [Ledger]
            storage_path = "/var/lib/porage/ledgers"

            [Journal]
            storage_path = "/var/lib/porage/journal"
            segment_soft_threshold = 1048576
            message_buffer_size = 256
            message_buffer_busy_threshold = 192
            group_commit_threshold = 64
            group_commit_interval_ms = 50
            trim_interval_s = 30

            [Memtable]
            trim_threshold = 5000

            [EntryLogger]
            storage_path = "/var/lib/porage/entrylogs"
            message_buffer_size = 256
            message_buffer_busy_threshold = 192
            flush_rate = 128
            flush_interval_s = 2

            [IndexFile]
            storage_path = "/var/lib/porage/index"
            memtable_size = 4194304

            [Log]
            level = "debug"
            output = "stderr"
            with_color = false

            [Server]
            host = "127.0.0.1"
            port = 32900
            grpc_port = 32901
        "#;

        let config: Config = toml::from_str(raw).expect("config should parse");
        assert_eq!(config.journal.group_commit_threshold, 64);
        assert_eq!(config.journal.group_commit_interval_ms, 50);
        assert_eq!(config.memtable.trim_threshold, 5000);
        assert_eq!(config.entry_logger.flush_rate, 128);
        assert_eq!(config.log.level, "debug");
        assert!(!config.log.with_color);
        assert_eq!(config.grpc_addr(), "127.0.0.1:32901");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[Server]\ngrpc_port = 40000\n")
            .expect("config should parse");
        assert_eq!(config.server.grpc_port, 40000);
        assert_eq!(config.log.level, "info");
        assert!(config.journal.segment_soft_threshold > 0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Config, _> = toml::from_str("[Journal]\nbogus = 1\n");
        assert!(result.is_err());
    }
}
