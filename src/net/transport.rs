use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{Interest, Ready};
use tokio::net::{TcpSocket, TcpStream};
use tokio::time;
use tracing::debug;

/// Errors surfaced by [`Transport`] operations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to create socket: {0}")]
    Create(io::Error),
    #[error("invalid socket handle: {0}")]
    Adopt(io::Error),
    #[error("failed to change blocking mode: {0}")]
    Flag(io::Error),
    #[error("connect failed: {0}")]
    Connect(io::Error),
    #[error("connection timed out after {0:?}")]
    Timeout(Duration),
    #[error("readiness poll failed: {0}")]
    Poll(io::Error),
    #[error("failed to receive data: {0}")]
    Recv(io::Error),
    #[error("failed to send data: {0}")]
    Send(io::Error),
}

/// Outcome of a single non-blocking read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvOutcome {
    /// `n` bytes were read into the buffer.
    Data(usize),
    /// The peer performed an orderly shutdown.
    Closed,
    /// No data is available right now; not an error.
    WouldBlock,
}

/// Exclusive owner of one connected TCP socket.
///
/// Dropping the transport closes the descriptor exactly once. Moving it
/// transfers ownership; it cannot be cloned.
#[derive(Debug)]
pub struct Transport {
    stream: TcpStream,
}

impl Transport {
    /// Opens an IPv4 stream socket with address reuse enabled and connects
    /// it to `addr` within `deadline`.
    ///
    /// A non-blocking connect resolving on writability is not by itself
    /// proof of success; the socket's pending error state is the only
    /// reliable completion signal, so it is checked after the connect
    /// future resolves.
    pub async fn connect(addr: SocketAddr, deadline: Duration) -> Result<Self, TransportError> {
        let socket = TcpSocket::new_v4().map_err(TransportError::Create)?;
        socket.set_reuseaddr(true).map_err(TransportError::Create)?;

        let stream = match time::timeout(deadline, socket.connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(TransportError::Connect(e)),
            Err(_) => return Err(TransportError::Timeout(deadline)),
        };

        if let Some(e) = stream.take_error().map_err(TransportError::Poll)? {
            return Err(TransportError::Connect(e));
        }

        Ok(Self { stream })
    }

    /// Wraps an already-open socket, e.g. one returned by an accept call in
    /// a server context. The handle is switched to non-blocking mode before
    /// it is registered with the runtime.
    pub fn adopt(stream: std::net::TcpStream) -> Result<Self, TransportError> {
        stream.set_nonblocking(true).map_err(TransportError::Flag)?;
        let stream = TcpStream::from_std(stream).map_err(TransportError::Adopt)?;
        Ok(Self { stream })
    }

    /// Waits until the socket is ready for `interest`. Callers bound the
    /// wait; this call itself has no deadline.
    pub async fn ready(&self, interest: Interest) -> Result<Ready, TransportError> {
        self.stream
            .ready(interest)
            .await
            .map_err(TransportError::Poll)
    }

    /// Attempts one non-blocking read into `buf`.
    pub fn try_recv(&self, buf: &mut [u8]) -> Result<RecvOutcome, TransportError> {
        match self.stream.try_read(buf) {
            Ok(0) => Ok(RecvOutcome::Closed),
            Ok(n) => {
                debug!("recv returned {n} bytes");
                Ok(RecvOutcome::Data(n))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(RecvOutcome::WouldBlock),
            Err(e) => Err(TransportError::Recv(e)),
        }
    }

    /// Reads up to `buf.len()` bytes without consuming them from the
    /// socket's receive queue.
    pub async fn peek(&self, buf: &mut [u8]) -> Result<usize, TransportError> {
        self.stream.peek(buf).await.map_err(TransportError::Recv)
    }

    /// Sends the whole buffer, waiting out transient backpressure between
    /// attempts. Callers never observe a short write.
    pub async fn send_all(&self, data: &[u8]) -> Result<usize, TransportError> {
        let mut sent = 0;

        while sent < data.len() {
            match self.stream.try_write(&data[sent..]) {
                Ok(0) => {
                    return Err(TransportError::Send(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection closed while sending",
                    )));
                }
                Ok(n) => sent += n,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    self.stream.writable().await.map_err(TransportError::Send)?;
                }
                Err(e) => return Err(TransportError::Send(e)),
            }
        }

        Ok(sent)
    }
}
