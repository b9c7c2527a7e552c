//! TCP connection layer.
//!
//! This module owns everything below the HTTP message layer:
//!
//! - **`transport`**: A move-only wrapper around one connected socket with a
//!   deadline-bounded connect, non-blocking reads and a full-buffer send loop
//! - **`manager`**: The connection lifecycle: liveness detection, readiness
//!   polls and the framing loop that assembles one complete HTTP message out
//!   of the byte stream

pub mod manager;
pub mod transport;

pub use manager::ConnectionManager;
pub use transport::{RecvOutcome, Transport, TransportError};
