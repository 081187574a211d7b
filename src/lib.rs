//! BitCaml - Bitcoin Transaction-Graph Explorer
//!
//! BitCaml lets an analyst explore the Bitcoin transaction graph outward from
//! a single wallet address, incrementally revealing connected wallets while a
//! session-scoped cache keeps previously fetched wallet attributes out of the
//! network path.
//!
//! # Architecture
//!
//! - **wallet**: Wire-level data model (WalletRecord, ConnectionSet)
//! - **cache**: SQLite-backed session cache with anchor-bound invalidation
//! - **backend**: HTTP client for the wallet-data API (bounded-time fetches)
//! - **graph**: Graph handle abstraction and the expansion engine
//! - **service**: Cache-aside orchestrator tying the above together
//! - **config**: Environment-driven configuration

pub mod backend;
pub mod cache;
pub mod config;
pub mod graph;
pub mod logging;
pub mod service;
pub mod wallet;

mod error;

// Re-exports
pub use error::{ExplorerError, Result};
