//! The Porage storage engine.
//!
//! A ledger is an ordered, immutable sequence of variable-size byte payloads.
//! Entries are assigned dense monotonic IDs on append and are retrievable by
//! that ID thereafter. Durability is provided by a process-wide write-ahead
//! journal with group commit; a per-ledger persistence task moves entries
//! from memory into an append-only entry log and a durable index, after which
//! the journal segments that carried them become eligible for trimming.
//!
//! Subsystems, in dependency order: the entry codec, the per-ledger entry
//! log, the per-ledger index, the per-ledger memtable, the shared journal,
//! and the ledger state machine that ties them together. [`LedgerControl`]
//! maintains the set of open ledgers and [`recovery`] reconciles persistent
//! state against the journal at startup.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
extern crate tracing;

pub mod config;
mod control;
mod entry;
mod entry_log;
mod error;
mod index;
pub mod journal;
pub mod ledger;
mod memtable;
pub mod recovery;
mod worker;

#[cfg(test)]
mod test;

pub use control::LedgerControl;
pub use entry::{
    DecodeError, EntryId, EntryMetadata, IndexValue, JournalEntryPayload, LedgerEntry, LedgerId,
};
pub use error::LedgerError;
pub use journal::Journal;
pub use ledger::Ledger;
pub use worker::WorkerDescription;
