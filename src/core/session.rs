use crate::core::config::AppConfig;

pub const URL_ENV: &str = "ROUTSTR_ADMIN_URL";
pub const TOKEN_ENV: &str = "ROUTSTR_ADMIN_TOKEN";

/// Where the session's token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Config,
    Env,
    None,
}

/// Connection to one node's admin API. Passed explicitly to every client;
/// there is no process-wide session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    base_url: String,
    token: Option<String>,
    token_source: TokenSource,
}

impl AdminSession {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        let token_source = if token.is_some() {
            TokenSource::Config
        } else {
            TokenSource::None
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            token_source,
        }
    }

    /// Build a session from config, letting ROUTSTR_ADMIN_URL and
    /// ROUTSTR_ADMIN_TOKEN override the stored values.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::resolve(
            config,
            std::env::var(URL_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        )
    }

    fn resolve(config: &AppConfig, url_env: Option<String>, token_env: Option<String>) -> Self {
        let base_url = url_env
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| config.node.base_url.clone());

        match token_env.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                let mut session = Self::new(&base_url, Some(token));
                session.token_source = TokenSource::Env;
                session
            }
            None => Self::new(&base_url, config.node.token.clone()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn token_source(&self) -> TokenSource {
        self.token_source
    }

    /// Absolute URL for an API path such as "/admin/api/models".
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Validate that a node URL is safe to send the admin token to.
///
/// HTTPS is required, except plain HTTP to the local machine.
pub fn validate_endpoint(url: &str) -> anyhow::Result<()> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if let Some(rest) = url.strip_prefix("http://") {
        let authority = rest.split('/').next().unwrap_or_default();
        let host = if authority.starts_with('[') {
            authority.split(']').next().map(|h| format!("{}]", h))
        } else {
            authority.split(':').next().map(str::to_string)
        };
        if let Some(host) = host {
            if ["localhost", "127.0.0.1", "[::1]"].contains(&host.as_str()) {
                return Ok(());
            }
        }
    }
    anyhow::bail!("node URL must use HTTPS (or http://localhost), got: {}", url)
}
