//! End-to-end tests driving a real server over gRPC.

use std::net::TcpListener;
use std::time::Duration;

use porage::client::PorageClient;
use porage::config::Config;
use porage::server;
use temp_dir::TempDir;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: String,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<anyhow::Result<()>>,
    _data_dir: TempDir,
}

impl TestServer {
    /// Starts a server on a free port with storage under a temp directory.
    async fn start() -> Self {
        let data_dir = TempDir::with_prefix("porage-e2e").expect("temp dir");
        let port = free_port();

        let mut config = Config::default();
        config.ledger.storage_path = data_dir.path().join("ledgers");
        config.journal.storage_path = data_dir.path().join("journal");
        config.entry_logger.storage_path = data_dir.path().join("entrylogs");
        config.index_file.storage_path = data_dir.path().join("index");
        config.journal.group_commit_threshold = 4;
        config.journal.group_commit_interval_ms = 10;
        config.entry_logger.flush_rate = 8;
        config.entry_logger.flush_interval_s = 1;
        config.server.host = "127.0.0.1".to_string();
        config.server.grpc_port = port;

        let addr = config.grpc_addr();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(server::run(config, async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            task,
            _data_dir: data_dir,
        }
    }

    async fn connect(&self) -> PorageClient {
        // The listener comes up asynchronously; retry briefly.
        for _ in 0..50 {
            if let Ok(client) = PorageClient::connect(&self.addr).await {
                return client;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("server at {} did not come up", self.addr);
    }

    async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task
            .await
            .expect("server task should not panic")
            .expect("server should stop cleanly");
    }
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

#[tokio::test]
async fn basic_round_trip() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.create_ledger(0).await.expect("create ledger");
    assert_eq!(
        client
            .append_entry(0, b"hello".to_vec())
            .await
            .expect("append"),
        0
    );
    assert_eq!(
        client
            .append_entry(0, b"world".to_vec())
            .await
            .expect("append"),
        1
    );

    assert_eq!(client.get_entry(0, 0).await.expect("get"), b"hello");
    assert_eq!(client.get_entry(0, 1).await.expect("get"), b"world");

    // Length counts indexed entries; give the flush timer a beat.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(client.ledger_length(0).await.expect("length"), 2);

    server.stop().await;
}

#[tokio::test]
async fn error_codes_reach_the_client() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.create_ledger(5).await.expect("create ledger");
    let status = client.create_ledger(5).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::AlreadyExists);

    let status = client.get_entry(5, 0).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::NotFound);

    let status = client.append_entry(42, b"nope".to_vec()).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::NotFound);

    server.stop().await;
}

#[tokio::test]
async fn close_ledger_removes_it() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.create_ledger(3).await.expect("create ledger");
    client
        .append_entry(3, b"payload".to_vec())
        .await
        .expect("append");
    assert_eq!(client.list_ledgers().await.expect("list"), vec![3]);

    client.close_ledger(3).await.expect("close ledger");
    assert!(client.list_ledgers().await.expect("list").is_empty());

    let status = client.get_entry(3, 0).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::NotFound);

    server.stop().await;
}

#[tokio::test]
async fn workers_are_visible() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.create_ledger(1).await.expect("create ledger");
    let workers = client.list_workers().await.expect("list workers");

    assert!(workers.contains_key("journal_worker"));
    assert!(workers.contains_key("trim_worker"));
    assert!(workers.contains_key("ledger-1-persistence-worker"));

    server.stop().await;
}
