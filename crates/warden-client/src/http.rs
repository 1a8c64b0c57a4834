//! Shared HTTP response handling for the logical API.
//!
//! Centralizes status-code checks (204/404 → no secret, non-success →
//! [`ClientError::Api`] with the server's `errors` array) so the client
//! stays focused on request construction.

use serde::Deserialize;

use crate::Secret;
use crate::error::ClientError;

/// How a `404 Not Found` should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Reads: absence is a normal outcome.
    Absent,
    /// Writes and deletes: absence is an error the caller can classify.
    Error,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Turn a logical API response into an optional [`Secret`].
///
/// - **204 No Content** or an empty body → `None`
/// - **404 Not Found** → `None` for [`Missing::Absent`], otherwise
///   [`ClientError::Api`]
/// - **Non-success status** → [`ClientError::Api`] with the decoded
///   `errors` array, or the raw body when it is not JSON
pub async fn into_secret(
    resp: reqwest::Response,
    missing: Missing,
) -> Result<Option<Secret>, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if status == reqwest::StatusCode::NOT_FOUND && missing == Missing::Absent {
        return Ok(None);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            errors: error_messages(&body),
        });
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ClientError::Parse(e.to_string()))
}

fn error_messages(body: &str) -> Vec<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.errors,
        Err(_) if body.trim().is_empty() => Vec::new(),
        Err(_) => vec![body.trim().to_string()],
    }
}
