// API client module: builds the import payload and sends it to the Apifox
// import-openapi endpoint through a `Transport`. It is deliberately
// synchronous: one request, one response, no retries.
//
// Endpoint reference: https://apifox-openapi.apifox.cn/api-173409873

use std::fs;
use std::io::Read;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::transport::{HttpRequest, Transport};

pub const API_PROJECTS_URL: &str = "https://api.apifox.com/v1/projects";
pub const API_VERSION_HEADER: &str = "x-apifox-api-version";
pub const OVERWRITE_EXISTING: &str = "OVERWRITE_EXISTING";

/// Placement and overwrite options. Behavior strings are not checked
/// against the values Apifox knows; they go out verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    pub target_endpoint_folder_id: i64,
    pub target_schema_folder_id: i64,
    pub endpoint_overwrite_behavior: String,
    pub schema_overwrite_behavior: String,
    pub update_folder_of_changed_endpoint: bool,
    pub prepend_base_path: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            target_endpoint_folder_id: 0,
            target_schema_folder_id: 0,
            endpoint_overwrite_behavior: OVERWRITE_EXISTING.to_string(),
            schema_overwrite_behavior: OVERWRITE_EXISTING.to_string(),
            update_folder_of_changed_endpoint: false,
            prepend_base_path: false,
        }
    }
}

/// Request body: the raw document plus options.
#[derive(Serialize, Debug)]
pub struct ImportPayload<'a> {
    pub input: &'a str,
    pub options: &'a ImportOptions,
}

/// A finished round trip. `status` is whatever the server answered; a 4xx
/// or 5xx still lands here rather than in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ImportOutcome {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Read the document to upload. Contents are not inspected; bytes that
/// are not valid UTF-8 become U+FFFD since the payload is JSON.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ImportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The project id becomes a single path segment: `/`, `?`, `#` and `%` are
/// percent-encoded so the id cannot reach outside `/v1/projects/`.
pub fn import_url(project_id: &str) -> Result<Url> {
    if matches!(project_id, "." | "..") {
        return Err(ImportError::RequestConstruction {
            reason: format!("invalid project id {project_id:?}"),
        });
    }
    let mut url = Url::parse(API_PROJECTS_URL).map_err(|e| ImportError::RequestConstruction {
        reason: format!("invalid url {API_PROJECTS_URL:?}: {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|()| ImportError::RequestConstruction {
            reason: format!("url {API_PROJECTS_URL:?} cannot take path segments"),
        })?
        .push(project_id)
        .push("import-openapi");
    url.set_query(Some("locale=zh-CN"));
    Ok(url)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ImportError::RequestConstruction {
        reason: format!("invalid {name} header: {e}"),
    })
}

/// Version, auth and content-type headers for an import call.
pub fn import_headers(config: &ImportConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(API_VERSION_HEADER),
        header_value("X-Apifox-Api-Version", &config.api_version)?,
    );
    let mut auth = header_value("Authorization", &format!("Bearer {}", config.token))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Serialize the payload and assemble the POST request.
pub fn build_request(document: &str, config: &ImportConfig) -> Result<HttpRequest> {
    let payload = ImportPayload {
        input: document,
        options: &config.options,
    };
    let body = serde_json::to_vec(&payload)?;
    let url = import_url(&config.project_id)?;
    let headers = import_headers(config)?;
    Ok(HttpRequest {
        method: Method::POST,
        url,
        headers,
        body,
    })
}

/// Client for the import endpoint. Holds the transport; configuration is
/// passed per call.
#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        ApiClient { transport }
    }

    /// Upload `document` and return the raw response. The status code is
    /// not checked: any fully received response counts as a completed
    /// import attempt and it is up to the caller to judge it.
    pub fn import(&self, document: &str, config: &ImportConfig) -> Result<ImportOutcome> {
        let request = build_request(document, config)?;
        let url = request.url.to_string();

        let mut res = self
            .transport
            .execute(request)
            .map_err(|source| ImportError::Transport { url, source })?;

        let mut body = Vec::new();
        res.body
            .read_to_end(&mut body)
            .map_err(ImportError::ResponseRead)?;

        Ok(ImportOutcome {
            status: res.status,
            body,
        })
    }

    /// Read the file at `path`, then import it. Nothing is sent if the
    /// file cannot be read.
    pub fn import_file(&self, path: &Path, config: &ImportConfig) -> Result<ImportOutcome> {
        let document = read_document(path)?;
        self.import(&document, config)
    }
}
