//! Typed client for the Porage service.

use std::collections::HashMap;

use tonic::transport::Channel;
use tonic::Status;

use crate::proto;
use crate::proto::porage_service_client::PorageServiceClient;

/// Thin wrapper over the generated gRPC client.
pub struct PorageClient {
    inner: PorageServiceClient<Channel>,
}

impl PorageClient {
    /// Connects to a `host:port` server address.
    pub async fn connect(server_addr: &str) -> Result<Self, tonic::transport::Error> {
        let inner = PorageServiceClient::connect(format!("http://{server_addr}")).await?;
        Ok(Self { inner })
    }

    pub async fn create_ledger(&mut self, ledger_id: u64) -> Result<(), Status> {
        self.inner
            .create_ledger(proto::CreateLedgerRequest { ledger_id })
            .await?;
        Ok(())
    }

    pub async fn append_entry(
        &mut self,
        ledger_id: u64,
        payload: Vec<u8>,
    ) -> Result<i64, Status> {
        let response = self
            .inner
            .append_entry_on_ledger(proto::AppendEntryOnLedgerRequest { ledger_id, payload })
            .await?;
        Ok(response.into_inner().entry_id)
    }

    pub async fn get_entry(&mut self, ledger_id: u64, entry_id: i64) -> Result<Vec<u8>, Status> {
        let response = self
            .inner
            .get_entry_from_ledger(proto::GetEntryFromLedgerRequest {
                ledger_id,
                entry_id,
            })
            .await?;
        Ok(response.into_inner().payload)
    }

    pub async fn close_ledger(&mut self, ledger_id: u64) -> Result<(), Status> {
        self.inner
            .delete_ledger(proto::DeleteLedgerRequest { ledger_id })
            .await?;
        Ok(())
    }

    pub async fn ledger_length(&mut self, ledger_id: u64) -> Result<i64, Status> {
        let response = self
            .inner
            .ledger_length(proto::LedgerLengthRequest { ledger_id })
            .await?;
        Ok(response.into_inner().length)
    }

    pub async fn list_ledgers(&mut self) -> Result<Vec<u64>, Status> {
        let response = self.inner.list_ledgers(proto::Empty {}).await?;
        Ok(response.into_inner().ledger_ids)
    }

    /// Worker name to human-readable description.
    pub async fn list_workers(&mut self) -> Result<HashMap<String, String>, Status> {
        let response = self.inner.list_workers(proto::Empty {}).await?;
        Ok(response
            .into_inner()
            .workers
            .into_iter()
            .map(|(name, worker)| (name, worker.description))
            .collect())
    }
}
