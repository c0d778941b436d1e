use crate::error::AppError;

use serde::de::DeserializeOwned;
use tracing::error;

/// Canonicalize a phone number: strip the separators people paste in, then
/// require `+` followed by 8 to 15 digits.
pub fn normalize_phone(raw: &str) -> Result<String, AppError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = cleaned
        .strip_prefix('+')
        .ok_or_else(|| AppError::InvalidPhone(raw.to_string()))?;
    if digits.len() < 8 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidPhone(raw.to_string()));
    }
    Ok(format!("+{digits}"))
}

/// Send a prepared request, mapping connect errors and timeouts.
pub async fn send_request(
    context: &'static str,
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response, AppError> {
    builder.send().await.map_err(|e| {
        error!(error=%e, context, "request failed");
        AppError::Transport { context, source: e }
    })
}

/// Read a JSON body, keeping the status and raw text of non-2xx responses.
pub async fn json_body<T: DeserializeOwned>(
    context: &'static str,
    resp: reqwest::Response,
) -> Result<T, AppError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        error!(error=%e, context, "failed to read response body");
        AppError::Transport { context, source: e }
    })?;
    if !status.is_success() {
        error!(status=%status, body=%body, context, "vendor returned an error");
        return Err(AppError::Http {
            context,
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| {
        error!(error=%e, body=%body, context, "failed to parse response body");
        AppError::Decode {
            context,
            detail: e.to_string(),
        }
    })
}

/// For endpoints whose success is an empty 2xx, like the table store's 204.
pub async fn expect_success(
    context: &'static str,
    resp: reqwest::Response,
) -> Result<(), AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    error!(status=%status, body=%body, context, "vendor returned an error");
    Err(AppError::Http {
        context,
        status: status.as_u16(),
        body,
    })
}
