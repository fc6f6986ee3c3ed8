//! Response handling shared by every adapter.

use factreel_error::{FactreelError, FactreelResult, ProviderError, ProviderErrorKind};
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use tracing::error;

/// Map a transport failure.
#[track_caller]
pub(crate) fn transport_error(provider: &'static str, e: reqwest::Error) -> FactreelError {
    error!(provider, error = ?e, "Failed to send request");
    ProviderError::new(provider, ProviderErrorKind::Http(format!("Request failed: {}", e))).into()
}

/// Pass successful responses through; turn anything else into an error.
///
/// `classify` receives the status and body text and decides the error kind.
pub(crate) async fn check_status(
    provider: &'static str,
    response: Response,
    classify: fn(u16, String) -> ProviderErrorKind,
) -> FactreelResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, body = %body, "Provider returned error");
    Err(ProviderError::new(provider, classify(status.as_u16(), body)).into())
}

/// Default classification: every failure is an `Api` error.
pub(crate) fn api_error(status: u16, message: String) -> ProviderErrorKind {
    ProviderErrorKind::Api { status, message }
}

/// MIME type from the `content-type` header, if present.
pub(crate) fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Read the body as bytes, rejecting empty bodies.
pub(crate) async fn body_bytes(
    provider: &'static str,
    response: Response,
    what: &str,
) -> FactreelResult<Vec<u8>> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(provider, e))?;
    if bytes.is_empty() {
        return Err(
            ProviderError::new(provider, ProviderErrorKind::EmptyResponse(what.to_string())).into(),
        );
    }
    Ok(bytes.to_vec())
}

/// Read an environment variable, trying each name in order.
pub(crate) fn env_credential(provider: &'static str, names: &[&str]) -> FactreelResult<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            ProviderError::new(
                provider,
                ProviderErrorKind::MissingCredential(names.join(" or ")),
            )
            .into()
        })
}
