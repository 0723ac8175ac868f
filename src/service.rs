//! gRPC surface of the store.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use porage_core::{Journal, LedgerControl, LedgerError};
use tonic::{Request, Response, Status};

use crate::proto;
use crate::proto::porage_service_server::PorageService;

/// Maps engine errors onto gRPC status codes. The ledger/entry taxonomy is
/// surfaced verbatim; everything else is an internal storage failure.
fn into_status(error: LedgerError) -> Status {
    match error {
        LedgerError::LedgerExisted { .. } => Status::already_exists(error.to_string()),
        LedgerError::LedgerNotFound { .. } | LedgerError::EntryNotFound { .. } => {
            Status::not_found(error.to_string())
        }
        LedgerError::BufferBusy => Status::resource_exhausted(error.to_string()),
        LedgerError::JournalClosed | LedgerError::LedgerClosed { .. } => {
            Status::unavailable(error.to_string())
        }
        LedgerError::CommitFailed { .. }
        | LedgerError::Io { .. }
        | LedgerError::Index { .. }
        | LedgerError::Corrupt { .. } => Status::internal(error.to_string()),
    }
}

/// The request handlers behind [`proto::porage_service_server::PorageServiceServer`].
pub struct PorageGrpcService {
    control: Arc<LedgerControl>,
    journal: Arc<Journal>,
}

impl PorageGrpcService {
    pub fn new(control: Arc<LedgerControl>, journal: Arc<Journal>) -> Self {
        Self { control, journal }
    }

    async fn ledger(
        &self,
        ledger_id: u64,
    ) -> Result<Arc<porage_core::Ledger>, Status> {
        self.control
            .get_ledger(ledger_id)
            .await
            .ok_or_else(|| into_status(LedgerError::LedgerNotFound { ledger_id }))
    }
}

#[tonic::async_trait]
impl PorageService for PorageGrpcService {
    async fn create_ledger(
        &self,
        request: Request<proto::CreateLedgerRequest>,
    ) -> Result<Response<proto::Empty>, Status> {
        let request = request.into_inner();
        self.control
            .create_ledger(request.ledger_id)
            .await
            .map_err(into_status)?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn append_entry_on_ledger(
        &self,
        request: Request<proto::AppendEntryOnLedgerRequest>,
    ) -> Result<Response<proto::AppendEntryOnLedgerResponse>, Status> {
        let request = request.into_inner();
        let ledger = self.ledger(request.ledger_id).await?;
        let entry_id = ledger
            .put_entry(Bytes::from(request.payload))
            .await
            .map_err(into_status)?;
        Ok(Response::new(proto::AppendEntryOnLedgerResponse {
            entry_id,
        }))
    }

    async fn get_entry_from_ledger(
        &self,
        request: Request<proto::GetEntryFromLedgerRequest>,
    ) -> Result<Response<proto::GetEntryFromLedgerResponse>, Status> {
        let request = request.into_inner();
        let ledger = self.ledger(request.ledger_id).await?;
        let entry = ledger
            .get_entry(request.entry_id)
            .map_err(into_status)?
            .ok_or_else(|| {
                into_status(LedgerError::EntryNotFound {
                    ledger_id: request.ledger_id,
                    entry_id: request.entry_id,
                })
            })?;
        Ok(Response::new(proto::GetEntryFromLedgerResponse {
            payload: entry.payload.to_vec(),
        }))
    }

    async fn delete_ledger(
        &self,
        request: Request<proto::DeleteLedgerRequest>,
    ) -> Result<Response<proto::Empty>, Status> {
        let request = request.into_inner();
        self.control
            .remove_ledger(request.ledger_id)
            .await
            .map_err(into_status)?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn ledger_length(
        &self,
        request: Request<proto::LedgerLengthRequest>,
    ) -> Result<Response<proto::LedgerLengthResponse>, Status> {
        let request = request.into_inner();
        let ledger = self.ledger(request.ledger_id).await?;
        let length = ledger.length().map_err(into_status)?;
        Ok(Response::new(proto::LedgerLengthResponse {
            length: length as i64,
        }))
    }

    async fn list_ledgers(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::ListLedgersResponse>, Status> {
        Ok(Response::new(proto::ListLedgersResponse {
            ledger_ids: self.control.list_ledgers().await,
        }))
    }

    async fn list_workers(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::ListWorkersResponse>, Status> {
        let mut workers = HashMap::new();
        for worker in self.journal.worker_descriptions() {
            workers.insert(
                worker.name,
                proto::WorkerDescription {
                    description: worker.description,
                },
            );
        }
        for worker in self.control.worker_descriptions().await {
            workers.insert(
                worker.name,
                proto::WorkerDescription {
                    description: worker.description,
                },
            );
        }
        Ok(Response::new(proto::ListWorkersResponse { workers }))
    }
}
