use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::admin::error::AdminError;
use crate::core::models::balance::BalanceSummary;
use crate::core::models::log::{LogEntry, LogsResponse};
use crate::core::models::model::{Model, ModelOverride};
use crate::core::models::provider::UpstreamProvider;
use crate::core::session::{validate_endpoint, AdminSession};

const MODELS_PATH: &str = "/admin/api/models";
const PROVIDERS_PATH: &str = "/admin/api/upstream-providers";
const LOGS_PATH: &str = "/admin/api/logs";
const BALANCES_PATH: &str = "/admin/api/balances";

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelsResponse {
    Wrapped { models: Vec<Model> },
    Bare(Vec<Model>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProvidersResponse {
    Wrapped { providers: Vec<UpstreamProvider> },
    Bare(Vec<UpstreamProvider>),
}

/// HTTP client for a node's admin API, bound to one session.
pub struct AdminClient {
    http: reqwest::Client,
    session: AdminSession,
}

impl AdminClient {
    pub fn new(session: AdminSession) -> Result<Self, AdminError> {
        validate_endpoint(session.base_url())
            .map_err(|e| AdminError::InvalidEndpoint(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            session,
        })
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    fn token(&self) -> Result<&str, AdminError> {
        self.session.token().ok_or(AdminError::MissingToken)
    }

    /// Send a request with the bearer token and decode a JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, AdminError> {
        let token = self.token()?;
        let response = request
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "admin api response");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminError::Unauthorized);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AdminError::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| AdminError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AdminError> {
        let url = self.session.endpoint(path);
        tracing::debug!(%url, "GET");
        let request = self.http.get(&url).query(query);
        self.send(request, &url).await
    }

    pub async fn list_models(&self) -> Result<Vec<Model>, AdminError> {
        let response: ModelsResponse = self.get(MODELS_PATH, &[]).await?;
        Ok(match response {
            ModelsResponse::Wrapped { models } => models,
            ModelsResponse::Bare(models) => models,
        })
    }

    pub async fn get_model(&self, id: &str) -> Result<Model, AdminError> {
        self.list_models()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AdminError::ModelNotFound(id.to_string()))
    }

    /// Store an override for a model and return the updated model.
    pub async fn update_model(
        &self,
        id: &str,
        model_override: &ModelOverride,
    ) -> Result<Model, AdminError> {
        let url = self.model_url(id)?;
        tracing::debug!(%url, "PATCH");
        let request = self.http.patch(url.clone()).json(model_override);
        self.send(request, url.as_str()).await
    }

    /// URL of one model. Each `/`-separated part of the id is
    /// percent-encoded as its own path segment.
    fn model_url(&self, id: &str) -> Result<reqwest::Url, AdminError> {
        let base = self.session.endpoint(MODELS_PATH);
        let mut url = reqwest::Url::parse(&base)
            .map_err(|e| AdminError::InvalidEndpoint(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| AdminError::InvalidEndpoint(base.clone()))?
            .extend(id.split('/'));
        Ok(url)
    }

    pub async fn list_providers(&self) -> Result<Vec<UpstreamProvider>, AdminError> {
        let response: ProvidersResponse = self.get(PROVIDERS_PATH, &[]).await?;
        Ok(match response {
            ProvidersResponse::Wrapped { providers } => providers,
            ProvidersResponse::Bare(providers) => providers,
        })
    }

    pub async fn list_logs(
        &self,
        limit: u32,
        level: Option<&str>,
    ) -> Result<Vec<LogEntry>, AdminError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(level) = level {
            query.push(("level", level.to_uppercase()));
        }
        let response: LogsResponse = self.get(LOGS_PATH, &query).await?;
        Ok(response.into_entries())
    }

    pub async fn balances(&self) -> Result<BalanceSummary, AdminError> {
        self.get(BALANCES_PATH, &[]).await
    }
}
