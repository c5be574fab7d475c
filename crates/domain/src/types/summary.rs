//! Meeting summary payload and its per-field decoding
//!
//! The server stores the summary's sub-documents as JSON-encoded strings
//! (`bullets_json`, `decisions_json`, `model_metadata`). Each one is decoded
//! on its own: a broken field falls back to an empty value without affecting
//! the others.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MinutesError, Result};

/// Summary record as returned by `GET /meetings/{id}/summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub meeting_id: Option<i64>,
    /// JSON-encoded array of key points
    #[serde(default)]
    pub bullets_json: Option<String>,
    /// JSON-encoded array of decisions
    #[serde(default)]
    pub decisions_json: Option<String>,
    /// JSON-encoded object (provider, model, token usage, prompt version)
    #[serde(default)]
    pub model_metadata: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SummaryPayload {
    pub fn try_bullets(&self) -> Result<Vec<String>> {
        decode_list(self.bullets_json.as_deref(), "bullets_json")
    }

    pub fn try_decisions(&self) -> Result<Vec<String>> {
        decode_list(self.decisions_json.as_deref(), "decisions_json")
    }

    pub fn try_metadata(&self) -> Result<Map<String, Value>> {
        let Some(raw) = non_empty(self.model_metadata.as_deref()) else {
            return Ok(Map::new());
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(MinutesError::Decode(format!(
                "model_metadata: expected object, found {}",
                kind_of(&other)
            ))),
            Err(err) => Err(MinutesError::Decode(format!("model_metadata: {err}"))),
        }
    }

    /// Decode all three sub-documents, replacing any that fail with an empty
    /// fallback.
    pub fn decode(&self) -> DecodedSummary {
        DecodedSummary {
            metadata: self.try_metadata().unwrap_or_default(),
            bullets: self.try_bullets().unwrap_or_default(),
            decisions: self.try_decisions().unwrap_or_default(),
        }
    }

    /// Errors from fields that would fall back during [`Self::decode`].
    pub fn decode_errors(&self) -> Vec<MinutesError> {
        [
            self.try_metadata().err(),
            self.try_bullets().err(),
            self.try_decisions().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Render-ready summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSummary {
    pub metadata: Map<String, Value>,
    pub bullets: Vec<String>,
    pub decisions: Vec<String>,
}

impl DecodedSummary {
    pub fn model(&self) -> Option<&str> {
        self.metadata.get("model").and_then(Value::as_str).filter(|m| !m.is_empty())
    }

    /// `usage.total_tokens`, when the provider reported it.
    pub fn total_tokens(&self) -> Option<u64> {
        self.metadata
            .get("usage")
            .and_then(|usage| usage.get("total_tokens"))
            .and_then(Value::as_u64)
            .filter(|tokens| *tokens > 0)
    }

    /// Caption line shown above the summary, e.g.
    /// `"Model: gpt-4o-mini • tokens: 512"`.
    pub fn caption(&self) -> String {
        let mut caption = format!("Model: {}", self.model().unwrap_or("—"));
        if let Some(tokens) = self.total_tokens() {
            caption.push_str(&format!(" • tokens: {tokens}"));
        }
        caption
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

fn decode_list(raw: Option<&str>, field: &str) -> Result<Vec<String>> {
    let Some(raw) = non_empty(raw) else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => Ok(entries.into_iter().map(entry_text).collect()),
        Ok(other) => Err(MinutesError::Decode(format!(
            "{field}: expected array, found {}",
            kind_of(&other)
        ))),
        Err(err) => Err(MinutesError::Decode(format!("{field}: {err}"))),
    }
}

fn entry_text(entry: Value) -> String {
    match entry {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
