//! Stop/stop-ack plumbing for background tasks.
//!
//! Every background task (the journal writer, the journal trimmer, and each
//! ledger's persistence task) is paired with a [`WorkerHandle`]. Stopping is
//! a synchronous handshake: the handle sends a stop request carrying an ack
//! channel, the task drains whatever it must not abandon, acknowledges, and
//! exits. The handle then waits for the task itself to finish so that no
//! file handles are left in use when the caller proceeds to delete files.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Introspection record for a running worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerDescription {
    pub name: String,
    pub description: String,
}

/// Receiving side of the stop handshake, held by the task.
///
/// Await [`StopListener::recv`] inside the task's select loop; the yielded
/// [`StopAck`] must be fired (via [`StopAck::acknowledge`]) once the task has
/// finished its shutdown work.
pub(crate) struct StopListener {
    rx: oneshot::Receiver<oneshot::Sender<()>>,
}

impl StopListener {
    /// Waits for a stop request. Also resolves if the handle is dropped
    /// without an explicit stop, in which case the ack is a no-op.
    pub(crate) async fn recv(&mut self) -> StopAck {
        match (&mut self.rx).await {
            Ok(ack_tx) => StopAck { tx: Some(ack_tx) },
            Err(_) => StopAck { tx: None },
        }
    }
}

pub(crate) struct StopAck {
    tx: Option<oneshot::Sender<()>>,
}

impl StopAck {
    pub(crate) fn acknowledge(self) {
        if let Some(tx) = self.tx {
            let _ = tx.send(());
        }
    }
}

/// Handle to a spawned background task.
pub(crate) struct WorkerHandle {
    name: String,
    description: String,
    stop_tx: Option<oneshot::Sender<oneshot::Sender<()>>>,
    task: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Creates the handle side of the handshake. The returned listener is
    /// moved into the task; the caller attaches the [`JoinHandle`] with
    /// [`WorkerHandle::attach`] once the task is spawned.
    pub(crate) fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> (Self, StopListener) {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = Self {
            name: name.into(),
            description: description.into(),
            stop_tx: Some(stop_tx),
            task: None,
        };
        (handle, StopListener { rx: stop_rx })
    }

    pub(crate) fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    /// Returns the introspection record while the worker is running.
    pub(crate) fn describe(&self) -> Option<WorkerDescription> {
        self.stop_tx.as_ref().map(|_| WorkerDescription {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }

    /// Requests a stop and waits for both the ack and task exit.
    ///
    /// Idempotent: subsequent calls return immediately.
    pub(crate) async fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let (ack_tx, ack_rx) = oneshot::channel();
            if stop_tx.send(ack_tx).is_ok() {
                let _ = ack_rx.await;
            }
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Kills the task without the handshake, simulating a crash.
    #[cfg(test)]
    pub(crate) fn abort(&mut self) {
        self.stop_tx.take();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
