use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::Interest;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::http::parser::find_headers_end;
use crate::net::transport::{RecvOutcome, Transport};

/// Deadline for a single connect attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Bounded wait for one readiness check.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);
/// Bounded wait for the liveness probe; elapsing means nothing is pending.
const PROBE_TIMEOUT: Duration = Duration::from_millis(1);
/// Size of each read issued against the socket.
const RECV_BUFFER_SIZE: usize = 128 * 1024;

/// Manages the lifecycle of one logical connection to a server.
///
/// The `connected` flag is advisory: it is accurate between a successful
/// [`connect`](Self::connect) and an observed close, but only
/// [`is_connected`](Self::is_connected) actively verifies it against the
/// socket. Every failure surfaces as `false`/`None` with a log line; the
/// manager itself never panics or returns an error type.
pub struct ConnectionManager {
    transport: Option<Transport>,
    connected: bool,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            transport: None,
            connected: false,
        }
    }

    /// Connects to `host:port`, replacing any live connection.
    ///
    /// `host` must be a dotted-decimal IPv4 literal and `port` a decimal in
    /// [1,65535]; invalid input fails fast without touching the network. On
    /// any failure the partially-built transport is discarded and `false`
    /// is returned.
    pub async fn connect(&mut self, host: &str, port: &str) -> bool {
        if host.is_empty() || port.is_empty() {
            return false;
        }

        if self.transport.is_some() {
            self.disconnect();
        }

        let Some(addr) = build_addr(host, port) else {
            return false;
        };

        info!("Attempting to connect to {host}:{port}");
        match Transport::connect(addr, CONNECT_TIMEOUT).await {
            Ok(transport) => {
                info!("Connection successful");
                self.transport = Some(transport);
                self.connected = true;
                true
            }
            Err(e) => {
                error!("Connection failed: {e}");
                false
            }
        }
    }

    /// Releases the transport and clears the connected flag. Safe to call
    /// when already disconnected.
    pub fn disconnect(&mut self) {
        self.transport = None;
        self.connected = false;
    }

    /// Authoritative liveness check.
    ///
    /// Performs a bounded, non-destructive one-byte peek: zero bytes means
    /// the peer closed, the probe timing out means nothing is pending and
    /// the connection is presumed alive, and any other error means the
    /// connection is broken. The flag is updated accordingly and returned.
    pub async fn is_connected(&mut self) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            return false;
        };

        let mut probe = [0u8; 1];
        match time::timeout(PROBE_TIMEOUT, transport.peek(&mut probe)).await {
            Ok(Ok(0)) => {
                debug!("Peer closed the connection");
                self.connected = false;
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                debug!("Liveness probe failed: {e}");
                self.connected = false;
            }
            Err(_) => {} // nothing pending, presumed alive
        }

        self.connected
    }

    /// Bounded check for write readiness.
    pub async fn is_writable(&self) -> bool {
        self.poll_ready(Interest::WRITABLE).await
    }

    /// Bounded check for read readiness.
    pub async fn is_readable(&self) -> bool {
        self.poll_ready(Interest::READABLE).await
    }

    async fn poll_ready(&self, interest: Interest) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            return false;
        };

        let direction = if interest.is_writable() {
            "writing"
        } else {
            "reading"
        };
        match time::timeout(POLL_TIMEOUT, transport.ready(interest)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!("Readiness poll for {direction} failed: {e}");
                false
            }
            Err(_) => {
                debug!("Socket not ready for {direction}");
                false
            }
        }
    }

    /// Sends the serialized request bytes. The transport handles partial
    /// writes; a short write is never observed.
    pub async fn send(&self, data: &[u8]) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            return false;
        };

        match transport.send_all(data).await {
            Ok(_) => true,
            Err(e) => {
                error!("Send failed: {e}");
                false
            }
        }
    }

    /// Reads one complete HTTP message off the socket.
    ///
    /// Bytes are accumulated until the CRLFCRLF header terminator appears;
    /// each iteration is gated on [`is_readable`](Self::is_readable), so a
    /// peer that stops sending fails the call instead of blocking it
    /// forever. Once the headers are in, a Content-Length header (if any)
    /// drives further reads until the body is complete or the peer stops
    /// delivering. The body phase is best-effort; a short body is left for
    /// the parser to reject.
    pub async fn receive(&self) -> Option<Vec<u8>> {
        let Some(transport) = self.transport.as_ref() else {
            return None;
        };

        let mut chunk = vec![0u8; RECV_BUFFER_SIZE];
        let mut data = BytesMut::with_capacity(RECV_BUFFER_SIZE);

        // Headers first: the terminator is the only boundary marker the
        // stream offers.
        let headers_end = loop {
            if let Some(pos) = find_headers_end(&data) {
                break pos;
            }
            if !self.is_readable().await {
                return None;
            }
            match transport.try_recv(&mut chunk) {
                Ok(RecvOutcome::Data(n)) => data.extend_from_slice(&chunk[..n]),
                Ok(RecvOutcome::Closed) | Ok(RecvOutcome::WouldBlock) => {
                    error!("Failed to read response headers");
                    return None;
                }
                Err(e) => {
                    error!("Failed to read response headers: {e}");
                    return None;
                }
            }
        };

        // Split off the body fragment that arrived with the headers; `data`
        // keeps the header block and terminator.
        let mut body = data.split_off(headers_end + 4);

        let header_block = String::from_utf8_lossy(&data[..headers_end]).into_owned();
        let expected = content_length_hint(&header_block);

        while expected > 0 && body.len() < expected {
            if !self.is_readable().await {
                return None;
            }
            match transport.try_recv(&mut chunk) {
                Ok(RecvOutcome::Data(n)) => body.extend_from_slice(&chunk[..n]),
                Ok(RecvOutcome::Closed) | Ok(RecvOutcome::WouldBlock) => {
                    warn!(
                        "Response body truncated: expected {expected} bytes, got {}",
                        body.len()
                    );
                    break;
                }
                Err(e) => {
                    error!("Failed to read response body: {e}");
                    return None;
                }
            }
        }

        data.unsplit(body);
        Some(data.to_vec())
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the target address from a dotted-decimal IPv4 literal and a
/// decimal port. No DNS resolution is performed.
fn build_addr(host: &str, port: &str) -> Option<SocketAddr> {
    let ip: Ipv4Addr = match host.parse() {
        Ok(ip) => ip,
        Err(_) => {
            error!("Invalid IP address: {host}");
            return None;
        }
    };

    match port.parse::<u16>() {
        Ok(port) if port != 0 => Some(SocketAddr::from((ip, port))),
        _ => {
            error!("Invalid port: {port}");
            None
        }
    }
}

/// Scans an already-received header block for a Content-Length value.
/// Unparsable values count as zero here; the strict check belongs to the
/// response parser.
fn content_length_hint(header_block: &str) -> usize {
    for line in header_block.split("\r\n") {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }
    0
}
