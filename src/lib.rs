//! Porage: a durable, append-only multi-ledger record store served over
//! gRPC.
//!
//! The storage engine lives in `porage-core`; this crate wires it to the
//! outside world: TOML configuration, tracing setup, the tonic service, and
//! a typed client used by the interactive shell.

#![deny(clippy::all)]

pub mod client;
pub mod config;
pub mod proto;
pub mod server;
pub mod service;
pub mod trace;
