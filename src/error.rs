// Error taxonomy for a single import. Each variant names the stage that
// failed; the underlying cause is only reachable through `source()`, so
// print with `{:#}` (anyhow) to get the whole chain once.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("read swagger file ({})", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encode payload")]
    Encoding(#[from] serde_json::Error),

    #[error("create request: {reason}")]
    RequestConstruction { reason: String },

    #[error("build http client")]
    Client(#[source] reqwest::Error),

    #[error("request import ({url})")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("read response")]
    ResponseRead(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
