//! Decoding of document-service (Notion) JSON into domain values.
//!
//! Only the wire format lives here. Talking to the service, authenticating
//! and draining paginated results is the job of whatever produced the JSON.

mod blocks;
mod pages;
mod rich_text;

use serde_json::Value;
use thiserror::Error;

pub use blocks::{decode_block_pages, decode_block_value, decode_blocks};
pub use pages::{decode_page_value, decode_posts};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected document shape: expected {expected}")]
    Shape { expected: &'static str },
}

impl DecodeError {
    fn shape(expected: &'static str) -> Self {
        Self::Shape { expected }
    }
}

/// Pull the item array out of either a bare array or a list envelope
/// (`{"object": "list", "results": [...]}`). An array of envelopes, as left
/// behind by a drained paginated listing, is flattened in order.
fn list_items(document: Value, expected: &'static str) -> Result<Vec<Value>, DecodeError> {
    match document {
        Value::Array(items) if items.iter().all(is_list_envelope) && !items.is_empty() => {
            let mut collected = Vec::new();
            for envelope in items {
                collected.extend(envelope_results(envelope, expected)?);
            }
            Ok(collected)
        }
        Value::Array(items) => Ok(items),
        envelope @ Value::Object(_) => envelope_results(envelope, expected),
        _ => Err(DecodeError::shape(expected)),
    }
}

fn is_list_envelope(value: &Value) -> bool {
    value.get("results").is_some_and(Value::is_array)
}

fn envelope_results(envelope: Value, expected: &'static str) -> Result<Vec<Value>, DecodeError> {
    if envelope.get("has_more").and_then(Value::as_bool) == Some(true) {
        let next_cursor = envelope
            .get("next_cursor")
            .and_then(Value::as_str)
            .unwrap_or("");
        tracing::warn!(
            target = "infra::notion",
            next_cursor,
            "list page reports more results; the dump is incomplete"
        );
    }

    match envelope {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(DecodeError::shape(expected)),
        },
        _ => Err(DecodeError::shape(expected)),
    }
}
