//! Tagged fetch results.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// How much of a non-JSON body to keep for diagnostics.
const PREVIEW_CHARS: usize = 200;

/// Body of a show API response.
///
/// The API answers some failures with an HTML page and a success status,
/// so a body that does not parse as JSON is kept as text instead of being
/// treated as a transport error. Callers decide what text means.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// A payload that does not have the expected `{ key: [...] }` shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPayload {
    #[error("response is not JSON: {preview}")]
    NotJson { preview: String },

    #[error("response is not a JSON object")]
    NotObject,

    #[error("response has no `{0}` key")]
    MissingKey(&'static str),

    #[error("`{0}` is not an array")]
    NotArray(&'static str),
}

impl Payload {
    /// Classify a response body as JSON or raw text.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        }
    }

    /// Extract the array stored under `key` as typed records.
    ///
    /// Elements that do not deserialize as `T` are logged and skipped so a
    /// single odd entry does not hide the rest of the collection.
    pub fn into_records<T: DeserializeOwned>(
        self,
        key: &'static str,
    ) -> Result<Vec<T>, MalformedPayload> {
        let value = match self {
            Payload::Json(value) => value,
            Payload::Text(text) => {
                return Err(MalformedPayload::NotJson {
                    preview: text.chars().take(PREVIEW_CHARS).collect(),
                });
            }
        };

        let Value::Object(mut object) = value else {
            return Err(MalformedPayload::NotObject);
        };

        let items = match object.remove(key) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(MalformedPayload::NotArray(key)),
            None => return Err(MalformedPayload::MissingKey(key)),
        };

        let records = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(key, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect();

        Ok(records)
    }
}
