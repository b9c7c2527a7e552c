//! Courier - Minimal HTTP/1.1 Client
//!
//! Core library for the TCP transport, connection lifecycle and HTTP
//! message handling.

pub mod client;
pub mod config;
pub mod http;
pub mod net;
