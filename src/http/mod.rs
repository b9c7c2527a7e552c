//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 message layer of the client: building
//! and serializing requests, and parsing the responses assembled by the
//! connection manager.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`headers`**: Case-insensitive header storage shared by both message types
//! - **`request`**: HTTP request representation, builder and wire serialization
//! - **`response`**: HTTP response representation and the status code table
//! - **`parser`**: Parses a complete raw response buffer into a [`response::Response`]
//!
//! # Message Flow
//!
//! ```text
//!   RequestBuilder ──build()──▶ Request ──serialize()──▶ bytes ──▶ socket
//!
//!   socket ──▶ framed bytes ──parse_http_response()──▶ Response
//!                                                        │
//!                                        keep_alive? ────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use courier::http::parser::parse_http_response;
//! use courier::http::request::{Method, RequestBuilder};
//!
//! let request = RequestBuilder::new()
//!     .method(Method::GET)
//!     .uri("/index.html")
//!     .header("Host", "127.0.0.1:8080")
//!     .build()?;
//! let wire = request.serialize();
//!
//! // ... send `wire`, receive `raw` through the connection manager ...
//!
//! let response = parse_http_response(&raw)?;
//! if !response.keep_alive {
//!     // drop the connection
//! }
//! ```

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;

pub(crate) const RULE_WIDTH: usize = 24;

/// Renders a horizontal rule with an optional centered title, used by the
/// `Display` impls of both message types.
pub(crate) fn rule(title: &str, fill: char, width: usize) -> String {
    if title.is_empty() {
        return fill.to_string().repeat(width);
    }

    let total_padding = width.saturating_sub(title.len() + 2);
    let padding = fill.to_string().repeat(total_padding / 2);

    let mut line = format!("{padding} {title} {padding}");
    if total_padding % 2 != 0 {
        line.push(fill);
    }
    line
}
