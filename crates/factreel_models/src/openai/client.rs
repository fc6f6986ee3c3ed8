//! Authenticated HTTP client shared by the OpenAI adapters.

use super::dto::OpenAIErrorBody;
use crate::OpenAIConfig;
use crate::http::{check_status, env_credential, transport_error};
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

pub(super) const PROVIDER: &str = "openai";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub(super) struct OpenAIClient {
    client: Client,
    api_key: String,
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Read `OPENAI_API_KEY` from the environment.
    pub(super) fn from_env(config: OpenAIConfig) -> FactreelResult<Self> {
        let api_key = env_credential(PROVIDER, &["OPENAI_API_KEY"])?;
        Ok(Self::with_api_key(api_key, config))
    }

    pub(super) fn with_api_key(api_key: impl Into<String>, config: OpenAIConfig) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    pub(super) fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// POST `body` to `{api_base}/{path}` and decode the JSON response.
    #[instrument(skip(self, body))]
    pub(super) async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> FactreelResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.api_base().trim_end_matches('/'), path);
        debug!(url = %url, "Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        let response = check_status(PROVIDER, response, classify_error).await?;

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            ProviderError::new(
                PROVIDER,
                ProviderErrorKind::Parse(format!("Failed to parse response: {}", e)),
            )
            .into()
        })
    }
}

/// Classify a non-success OpenAI response.
///
/// Content-policy refusals come back as 400s; they are split out so they
/// are never retried.
pub(super) fn classify_error(status: u16, body: String) -> ProviderErrorKind {
    let detail = serde_json::from_str::<OpenAIErrorBody>(&body)
        .ok()
        .map(|b| b.error);

    let is_policy = detail.as_ref().is_some_and(|d| {
        d.code.as_deref() == Some("content_policy_violation")
            || d.kind.as_deref() == Some("content_policy_violation")
    }) || body.contains("content_policy_violation");

    let message = detail.map(|d| d.message).filter(|m| !m.is_empty()).unwrap_or(body);

    if status == 400 && is_policy {
        ProviderErrorKind::PolicyRejection(message)
    } else {
        ProviderErrorKind::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_violation_is_not_retryable() {
        let body = r#"{"error":{"message":"Your request was rejected as a result of our safety system.","type":"invalid_request_error","code":"content_policy_violation"}}"#;
        let kind = classify_error(400, body.to_string());
        assert!(matches!(kind, ProviderErrorKind::PolicyRejection(ref m) if m.contains("safety system")));
        assert!(!kind.is_retryable());
    }

    #[test]
    fn server_errors_keep_status() {
        let body = r#"{"error":{"message":"The server is overloaded","type":"server_error","code":null}}"#;
        let kind = classify_error(503, body.to_string());
        assert_eq!(
            kind,
            ProviderErrorKind::Api {
                status: 503,
                message: "The server is overloaded".to_string()
            }
        );
        assert!(kind.is_retryable());
    }

    #[test]
    fn unparseable_body_is_used_verbatim() {
        let kind = classify_error(502, "Bad Gateway".to_string());
        assert_eq!(
            kind,
            ProviderErrorKind::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }
}
