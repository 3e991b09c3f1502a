//! Async client for the craftwatch status resources.
//!
//! Two static JSON documents are published by an external producer next to
//! the dashboard:
//!
//! - **snapshot** (`data/latest.json`) — current player count, in-game
//!   clock, host uptime, computer identifier and the online roster.
//! - **history** (`data/history.json`) — pre-aggregated player-count
//!   observations.
//!
//! [`StatusClient`] fetches both. Every field is optional on the wire;
//! [`models`] decodes leniently so a partially-written document still yields
//! a usable record. Transport, status and shape failures surface as
//! [`Error`], classified by [`FailureKind`].

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_HISTORY_PATH, DEFAULT_SNAPSHOT_PATH, Endpoints, StatusClient};
pub use error::{Error, FailureKind};
pub use models::{HistoryEntry, HistoryRecord, Snapshot};
pub use transport::{TlsMode, TransportConfig};
