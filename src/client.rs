use tracing::{debug, error, info};

use crate::http::parser::parse_http_response;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::net::ConnectionManager;

/// Drives one request/response cycle at a time over a managed connection.
pub struct HttpClient {
    manager: ConnectionManager,
}

impl HttpClient {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    pub fn manager_mut(&mut self) -> &mut ConnectionManager {
        &mut self.manager
    }

    /// Serializes and sends `request` to `host:port`, then receives and
    /// parses the response.
    ///
    /// Connects first if no live connection exists. When the response does
    /// not ask for keep-alive the connection is dropped before returning.
    /// Every failure is logged and collapses to `None`; the caller decides
    /// whether to retry.
    pub async fn process_request(
        &mut self,
        request: &Request,
        host: &str,
        port: &str,
    ) -> Option<Response> {
        if !self.manager.is_connected().await && !self.manager.connect(host, port).await {
            error!("Failed to connect to {host}:{port}");
            return None;
        }

        let payload = request.serialize();
        debug!("Serialized request ({} bytes)", payload.len());
        if !self.manager.send(&payload).await {
            error!("Failed to send request to {host}:{port}");
            return None;
        }

        let raw = match self.manager.receive().await {
            Some(raw) => raw,
            None => {
                error!("Failed to receive response from {host}:{port}");
                return None;
            }
        };

        debug!("Raw response received, parsing");
        let response = match parse_http_response(&raw) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to parse HTTP response: {e:?}");
                return None;
            }
        };

        if !response.keep_alive {
            info!("Connection not kept alive, disconnecting");
            self.manager.disconnect();
        }

        Some(response)
    }
}
