//! HTTP seam: the `Transport` trait and its ureq-backed implementation.

use std::io::{self, Read};
use std::time::Duration;

use serde_json::Value as JsonValue;
use url::Url;

/// Overall per-request timeout, matching the mobile platform default.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Upper bound on a response body read into memory.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Raw reply from the server: any status, whatever body came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The request never produced a readable response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),
    #[error("reading response body: {0}")]
    Body(#[from] io::Error),
    /// The body arrived but is larger than the client accepts.
    #[error("response exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// POSTs a JSON document and hands back the raw reply.
///
/// A non-2xx status is still a reply, not a `TransportError`.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &Url, body: &JsonValue) -> Result<HttpReply, TransportError>;
}

// ---------------------------------------------------------------------------
// ureq implementation
// ---------------------------------------------------------------------------

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &Url, body: &JsonValue) -> Result<HttpReply, TransportError> {
        let request = self
            .agent
            .post(url.as_str())
            .set("Content-Type", "application/json");

        let response = match request.send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                log::debug!("{url} answered HTTP {code}");
                response
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(TransportError::Request(err.to_string()));
            }
        };

        let status = response.status();
        let body = read_response_bytes(response, MAX_RESPONSE_BYTES)?;
        Ok(HttpReply { status, body })
    }
}

/// Read a response into memory, enforcing a maximum byte size.
fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(TransportError::BodyTooLarge { limit: max_bytes });
    }
    Ok(bytes)
}
