//! Pulls one JSON object out of free-form model output.
//!
//! Models routinely wrap the requested JSON in prose or markdown fences, so
//! several strategies are tried in a fixed order and the first that yields an
//! object wins.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub type JsonObject = Map<String, Value>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Could not extract valid JSON from response")]
    ParseFailure,
}

type Strategy = fn(&str) -> Option<JsonObject>;

const STRATEGIES: &[(&str, Strategy)] =
    &[("whole_text", whole_text), ("fenced_block", fenced_block), ("brace_span", brace_span)];

pub fn extract_json(raw: &str) -> Result<JsonObject, ExtractError> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            let object = strategy(raw)?;
            debug!(event_name = "agent.extract.matched", strategy = *name, "json object extracted");
            Some(object)
        })
        .ok_or(ExtractError::ParseFailure)
}

fn parse_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn whole_text(raw: &str) -> Option<JsonObject> {
    parse_object(raw)
}

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence pattern is a valid regex")
    })
}

fn fenced_block(raw: &str) -> Option<JsonObject> {
    let captures = fence_pattern().captures(raw)?;
    parse_object(captures.get(1)?.as_str())
}

/// Widest span: first `{` through last `}`.
fn brace_span(raw: &str) -> Option<JsonObject> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    parse_object(&raw[start..=end])
}
