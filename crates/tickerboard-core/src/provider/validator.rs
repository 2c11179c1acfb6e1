//! Classification of raw provider responses.

use serde_json::Value;

use crate::error::ProviderError;
use crate::http_client::HttpResponse;

const LOGGED_BODY_LIMIT: usize = 512;

/// Parsed provider payload plus any non-fatal notices it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    pub value: Value,
    pub advisories: Vec<Advisory>,
}

/// Non-fatal provider notice, usually a rate-limit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub field: &'static str,
    pub message: String,
}

/// Run a response through the status, emptiness, JSON, and provider-error checks.
pub fn validate_response(response: &HttpResponse) -> Result<ValidatedPayload, ProviderError> {
    if !response.is_success() {
        return Err(http_failure(response));
    }

    let text = response.body.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(text).map_err(|error| {
        tracing::debug!(
            %error,
            body = %truncate(text, LOGGED_BODY_LIMIT),
            "failed to parse provider response"
        );
        ProviderError::MalformedPayload
    })?;

    if let Some(message) = string_field(&value, "Error Message") {
        return Err(ProviderError::Logical(message.to_owned()));
    }

    let advisories = ["Information", "Note"]
        .into_iter()
        .filter_map(|field| {
            string_field(&value, field).map(|message| Advisory {
                field,
                message: message.to_owned(),
            })
        })
        .collect::<Vec<_>>();

    for advisory in &advisories {
        tracing::warn!(field = advisory.field, message = %advisory.message, "provider advisory");
    }

    Ok(ValidatedPayload { value, advisories })
}

fn http_failure(response: &HttpResponse) -> ProviderError {
    let detail = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| string_field(&body, "message").map(str::to_owned))
        .unwrap_or_else(|| response.reason().to_owned());

    ProviderError::Http {
        status: response.status,
        message: format!(
            "API request failed with status {}: {detail}",
            response.status
        ),
    }
}

fn string_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
