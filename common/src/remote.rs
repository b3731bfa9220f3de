//! Transport-free half of the calls to the remote parsing service.
//!
//! The frontend performs the HTTP exchange and hands the status code and the
//! body text to the functions here, which decide between success and a
//! [`RemoteError`]. Model output frequently arrives wrapped in a markdown
//! code fence, so bodies are unwrapped before any JSON parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RemoteError;
use crate::model::parsed::ParsedData;
use crate::model::preview::PreviewData;

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A\s*```(?i:json)?(.*?)```\s*\z").unwrap());

/// Strips a surrounding ```` ```json ```` / ```` ``` ```` fence and the
/// whitespace around its content. Unfenced text is only trimmed.
pub fn unwrap_fenced(body: &str) -> &str {
    match FENCE.captures(body).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => body.trim(),
    }
}

/// Parses a (possibly fenced) body as preview JSON.
pub fn parse_preview(body: &str) -> Option<PreviewData> {
    serde_json::from_str::<Value>(unwrap_fenced(body))
        .ok()
        .map(PreviewData::new)
}

/// Outcome of the map-schema and AI-generation endpoints.
///
/// A success status with a body that is not JSON is a failure whose message
/// is the original body, never a secondary parse error. An error status whose
/// body still carries (possibly fenced) JSON resolves to that JSON.
pub fn resolve_response(status: u16, body: &str) -> Result<PreviewData, RemoteError> {
    if let Err(err) = check_status(status, body) {
        return match parse_preview(body) {
            Some(preview) => {
                log::warn!("status {status} carried a JSON body, using it as the preview");
                Ok(preview)
            }
            None => Err(err),
        };
    }
    parse_preview(body).ok_or_else(|| unparsable(body))
}

/// Outcome of the document parse endpoint.
pub fn resolve_parsed(status: u16, body: &str) -> Result<ParsedData, RemoteError> {
    resolve_json(status, body)
}

fn resolve_json<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RemoteError> {
    check_status(status, body)?;
    serde_json::from_str(unwrap_fenced(body)).map_err(|err| {
        log::warn!("unexpected response body: {err}");
        unparsable(body)
    })
}

fn check_status(status: u16, body: &str) -> Result<(), RemoteError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = if body.trim().is_empty() {
        format!("Server responded with status: {status}")
    } else {
        body.to_string()
    };
    Err(RemoteError::Status { status, message })
}

fn unparsable(body: &str) -> RemoteError {
    if body.trim().is_empty() {
        RemoteError::Unparsable("The server returned an empty response".to_string())
    } else {
        RemoteError::Unparsable(body.to_string())
    }
}
