use std::io;

use snafu::Snafu;

use crate::entry::DecodeError;

/// Error surfaced by ledger operations and the ledger registry.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LedgerError {
    /// A ledger with the requested ID already exists.
    #[snafu(display("ledger {ledger_id} already exists"))]
    LedgerExisted { ledger_id: u64 },

    /// No ledger with the requested ID is open.
    #[snafu(display("ledger {ledger_id} not found"))]
    LedgerNotFound { ledger_id: u64 },

    /// The requested entry is neither in the memtable nor in the index.
    #[snafu(display("entry {entry_id} not found in ledger {ledger_id}"))]
    EntryNotFound { ledger_id: u64, entry_id: i64 },

    /// The journal input channel is above its busy threshold.
    ///
    /// This is a fast-fail signal: the caller may retry after backing off.
    /// Nothing has been written on behalf of the rejected entry.
    #[snafu(display("journal write buffer busy"))]
    BufferBusy,

    /// The journal writer task is no longer running.
    ///
    /// Appends can race a server shutdown; an entry that receives this error
    /// was not acknowledged and must be treated as never written.
    #[snafu(display("journal writer unavailable"))]
    JournalClosed,

    /// The ledger's persistence task is no longer running.
    #[snafu(display("ledger {ledger_id} is shut down"))]
    LedgerClosed { ledger_id: u64 },

    /// The group commit covering this entry failed.
    ///
    /// The error is fanned out to every writer in the failed batch, so the
    /// underlying I/O error is carried as a message rather than a source.
    #[snafu(display("journal commit failed: {message}"))]
    CommitFailed { message: String },

    /// An I/O failure from the entry log, the journal, or a marker file.
    ///
    /// Non-retriable; the ledger remains in whatever consistent state it
    /// reached before the failure.
    #[snafu(display("storage I/O error: {source}"))]
    Io { source: io::Error },

    /// A failure inside the index engine.
    #[snafu(display("index error: {source}"))]
    Index { source: sled::Error },

    /// On-disk bytes did not decode to the expected record shape.
    ///
    /// Indicates corruption or out-of-band modification of the backing files.
    #[snafu(display("corrupt record: {source}"))]
    Corrupt { source: DecodeError },
}
