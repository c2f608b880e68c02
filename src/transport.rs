// HTTP seam: the importer hands a fully built `HttpRequest` to a
// `Transport` and gets back a status plus a body stream. The production
// implementation is a thin wrapper around reqwest's blocking client; tests
// swap in an in-memory transport so nothing touches the network.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};

use crate::error::{ImportError, Result};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A request ready to go on the wire. Building one already validated the
/// URL and every header value.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Status line plus an unread body. The body is released when this value
/// is dropped, whichever path the caller takes.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

pub trait Transport {
    /// Send the request and return once the response head has arrived.
    fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

/// Blocking reqwest client. `timeout: None` means the call may block for
/// as long as the server keeps the connection open.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        // reqwest's blocking client defaults to 30s, so pass the value through
        // even when it is None.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ImportError::Client)?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let res = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()?;
        Ok(HttpResponse {
            status: res.status().as_u16(),
            body: Box::new(res),
        })
    }
}
