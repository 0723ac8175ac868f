//! Shared helpers for engine tests.

use std::future::Future;
use std::path::Path;

use bytes::Bytes;
use rand::RngCore;
use temp_dir::TempDir;

/// Run a future with a temporary directory.
///
/// # Panics
///
/// Will panic if the temporary directory cannot be created.
pub(crate) async fn with_temp_dir<F, Fut, V>(f: F) -> V
where
    F: FnOnce(&Path) -> Fut,
    Fut: Future<Output = V>,
{
    let dir = TempDir::with_prefix("porage")
        .expect("cannot recover from failure to create temp dir");
    f(dir.path()).await
}

/// Storage configuration rooted under `root` with timers and batch sizes
/// tightened so tests exercise flushes and commits quickly.
pub(crate) fn fast_storage_config(root: &Path) -> crate::config::StorageConfig {
    let mut config = crate::config::StorageConfig::under_root(root);
    config.journal.group_commit_threshold = 4;
    config.journal.group_commit_interval_ms = 10;
    config.entry_logger.flush_rate = 8;
    config.entry_logger.flush_interval_s = 1;
    config.memtable.trim_threshold = 64;
    config
}

/// Payload of `len` random bytes.
pub(crate) fn random_payload(len: usize) -> Bytes {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    Bytes::from(buf)
}

#[macro_export]
macro_rules! await_timeout {
    ($fut:expr, $secs:expr) => {{
        tokio::time::timeout(std::time::Duration::from_secs($secs), $fut)
            .await
            .expect("future should not timeout")
    }};
}
