use serde::{Deserialize, Serialize};

/// An upstream LLM provider configured on the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamProvider {
    pub id: i64,
    pub provider_type: String,
    pub base_url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Masked by the backend; never printed in full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_fee: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl UpstreamProvider {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
