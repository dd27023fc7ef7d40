//! Lantern Server - private article retrieval over TCP
//!
//! This crate implements the serving side of Lantern's retrieval
//! protocol. The corpus is encoded into an immutable, versioned snapshot;
//! a background task re-encodes it on an interval and publishes each new
//! generation atomically. Every accepted connection is pinned to the
//! snapshot that was current at accept time and keeps that exact view of
//! the database, hint and parameters for its whole life, no matter how
//! many generations are published meanwhile.
//!
//! The server supports:
//! - Any number of concurrent connections, each on its own task
//! - Length-prefixed JSON framing compatible with existing clients
//! - Periodic corpus refresh that never disturbs in-flight sessions
//! - Crash-free degradation: a failed refresh keeps the previous snapshot

mod connection;
mod framing;
mod manager;
mod protocol;
mod server;
mod snapshot;

pub use connection::ConnectionError;
pub use framing::{read_frame, write_frame, FrameError, MAX_FRAME_LEN};
pub use manager::CorpusManager;
pub use protocol::{Answer, Query, Setup, WireParams};
pub use server::{ArticleServer, ServerConfig};
pub use snapshot::{CorpusSnapshot, SnapshotError};
