use std::collections::HashMap;
use std::sync::Arc;

use snafu::{ensure, ResultExt};
use tokio::sync::RwLock;

use crate::config::StorageConfig;
use crate::error::{IoSnafu, LedgerError, LedgerExistedSnafu};
use crate::journal::Journal;
use crate::ledger::Ledger;
use crate::worker::WorkerDescription;

/// Registry of open ledgers.
///
/// Request handlers read the registry concurrently; creating, removing, and
/// recovery-time insertion take the write half.
pub struct LedgerControl {
    config: StorageConfig,
    journal: Arc<Journal>,
    ledgers: RwLock<HashMap<u64, Arc<Ledger>>>,
}

impl LedgerControl {
    /// Creates the storage directories and an empty registry.
    pub async fn start(
        config: StorageConfig,
        journal: Arc<Journal>,
    ) -> Result<Self, LedgerError> {
        for dir in [
            &config.ledger.storage_path,
            &config.entry_logger.storage_path,
            &config.index_file.storage_path,
        ] {
            tokio::fs::create_dir_all(dir).await.context(IoSnafu)?;
        }

        Ok(Self {
            config,
            journal,
            ledgers: RwLock::new(HashMap::new()),
        })
    }

    /// Creates a new ledger. Fails if a ledger with this ID is already open.
    pub async fn create_ledger(&self, ledger_id: u64) -> Result<(), LedgerError> {
        let mut ledgers = self.ledgers.write().await;
        ensure!(
            !ledgers.contains_key(&ledger_id),
            LedgerExistedSnafu { ledger_id }
        );

        let ledger = Ledger::open(ledger_id, &self.config, Arc::clone(&self.journal)).await?;
        ledgers.insert(ledger_id, ledger);
        info!(ledger_id, "Created ledger.");
        Ok(())
    }

    pub async fn get_ledger(&self, ledger_id: u64) -> Option<Arc<Ledger>> {
        self.ledgers.read().await.get(&ledger_id).cloned()
    }

    /// Closes the ledger, deletes its backing storage, and drops it from the
    /// registry.
    pub async fn remove_ledger(&self, ledger_id: u64) -> Result<(), LedgerError> {
        let mut ledgers = self.ledgers.write().await;
        let ledger = ledgers
            .get(&ledger_id)
            .cloned()
            .ok_or(LedgerError::LedgerNotFound { ledger_id })?;
        ledger.close().await?;
        ledgers.remove(&ledger_id);
        Ok(())
    }

    /// IDs of every open ledger, in no particular order.
    pub async fn list_ledgers(&self) -> Vec<u64> {
        self.ledgers.read().await.keys().copied().collect()
    }

    /// Inserts a ledger rebuilt by recovery.
    pub(crate) async fn add_recovered(&self, ledger: Arc<Ledger>) {
        self.ledgers
            .write()
            .await
            .insert(ledger.ledger_id(), ledger);
    }

    /// Stops every ledger's persistence task. Each performs a final flush,
    /// so all accepted writes are indexed when this returns.
    pub async fn shutdown(&self) {
        let ledgers = self.ledgers.read().await;
        for ledger in ledgers.values() {
            ledger.stop().await;
        }
        info!(ledgers = ledgers.len(), "Ledgers stopped.");
    }

    /// Introspection records for every running persistence task.
    pub async fn worker_descriptions(&self) -> Vec<WorkerDescription> {
        self.ledgers
            .read()
            .await
            .values()
            .filter_map(|ledger| ledger.worker_description())
            .collect()
    }

    pub(crate) fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub(crate) fn journal(&self) -> &Arc<Journal> {
        &self.journal
    }
}
