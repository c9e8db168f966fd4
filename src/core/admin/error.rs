use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("No admin token configured. Run `routstr-admin config login --token <TOKEN>`")]
    MissingToken,
    #[error("Unauthorized - the node rejected the admin token")]
    Unauthorized,
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    #[error("Invalid node URL: {0}")]
    InvalidEndpoint(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AdminError {
    /// Whether the session should be torn down.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
