//! Shared HTTP response handling for the gateway clients.

use lookbook_core::error::{LookbookError, Result};
use reqwest::{Response, StatusCode};

/// Maps a transport-level failure (connect, timeout, DNS) onto the error
/// taxonomy. Anything that never produced a response means the remote is
/// unreachable from the client's point of view.
pub(crate) fn transport_error(err: reqwest::Error) -> LookbookError {
    if err.is_timeout() {
        LookbookError::remote_unavailable(format!("request timed out: {}", err))
    } else {
        LookbookError::remote_unavailable(err.to_string())
    }
}

/// Checks a response status before the body is consumed.
///
/// A 404 maps to `NotFound` for the entity named in `not_found`, or to
/// `RemoteRejected` when no entity mapping applies (e.g. on create). Any
/// other non-success status maps to `RemoteRejected` carrying the body text.
pub(crate) async fn check_status(
    response: Response,
    not_found: Option<(&'static str, &str)>,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some((entity_type, id)) = not_found {
            return Err(LookbookError::not_found(entity_type, id));
        }
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(LookbookError::remote_rejected(status.as_u16(), message))
}
