//! Server assembly and lifecycle.
//!
//! Startup order matters: storage directories, then the journal (which opens
//! a fresh current segment), then the ledger registry, then recovery, and
//! only then the RPC listener. Shutdown runs the same pipeline in reverse:
//! the listener drains in-flight requests, the journal commits whatever is
//! pending, and each ledger takes a final flush.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use porage_core::{recovery, Journal, LedgerControl};
use tonic::transport::Server;
use tracing::info;

use crate::config::Config;
use crate::proto::porage_service_server::PorageServiceServer;
use crate::service::PorageGrpcService;

/// Runs the server until `shutdown` resolves, then stops it gracefully.
pub async fn run(config: Config, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let journal = Journal::start(config.journal.clone())
        .await
        .context("failed to start journal")?;
    let control = Arc::new(
        LedgerControl::start(config.storage(), Arc::clone(&journal))
            .await
            .context("failed to start ledger control")?,
    );

    let report = recovery::recover(&control)
        .await
        .context("recovery failed")?;
    info!(
        ledgers = report.ledgers,
        recovered = report.recovered,
        "Porage server recovered."
    );

    let addr = config
        .grpc_addr()
        .parse()
        .with_context(|| format!("invalid gRPC listen address {:?}", config.grpc_addr()))?;
    let service = PorageGrpcService::new(Arc::clone(&control), Arc::clone(&journal));

    info!(%addr, "Porage server listening.");
    Server::builder()
        .add_service(PorageServiceServer::new(service))
        .serve_with_shutdown(addr, shutdown)
        .await
        .context("gRPC server failed")?;

    info!("RPC listener drained; stopping storage.");
    journal.stop().await;
    control.shutdown().await;
    info!("Porage server stopped.");
    Ok(())
}
