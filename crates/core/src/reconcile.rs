//! Forces model-proposed quote content back onto the caller's numbers.
//!
//! Model entries are aligned with the input services by position only. Text
//! may come from the model; hours, rates and amounts never do.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::quote::{Language, QuoteContent, QuoteService, ServiceInput};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("service entry {index} is not a JSON object")]
    MalformedEntry { index: usize },
    #[error("service entry {index} has a non-text description")]
    MalformedDescription { index: usize },
    #[error("field `{field}` has an unexpected type")]
    MalformedField { field: &'static str },
    #[error("service entry {index} amount exceeds the supported range")]
    AmountOverflow { index: usize },
}

enum TextField<'a> {
    Missing,
    Present(&'a str),
    Invalid,
}

fn text_field<'a>(object: &'a Map<String, Value>, key: &str) -> TextField<'a> {
    match object.get(key) {
        None | Some(Value::Null) => TextField::Missing,
        Some(Value::String(value)) => TextField::Present(value),
        Some(_) => TextField::Invalid,
    }
}

pub fn reconcile_services(
    model_services: &[Value],
    inputs: &[ServiceInput],
) -> Result<Vec<QuoteService>, ReconcileError> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let description = match model_services.get(index) {
                None => None,
                Some(Value::Object(entry)) => match text_field(entry, "description") {
                    TextField::Missing => None,
                    TextField::Present(text) => Some(text.to_owned()),
                    TextField::Invalid => {
                        return Err(ReconcileError::MalformedDescription { index })
                    }
                },
                Some(_) => return Err(ReconcileError::MalformedEntry { index }),
            };

            QuoteService::from_input(
                input,
                description.unwrap_or_else(|| input.description.clone()),
            )
            .ok_or(ReconcileError::AmountOverflow { index })
        })
        .collect()
}

pub fn assemble_content(
    object: &Map<String, Value>,
    inputs: &[ServiceInput],
    language: Language,
) -> Result<QuoteContent, ReconcileError> {
    let model_services: &[Value] = match object.get("services") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ReconcileError::MalformedField { field: "services" }),
    };

    Ok(QuoteContent {
        introduction: text_or(object, "introduction", "")?,
        services: reconcile_services(model_services, inputs)?,
        timeline: text_or(object, "timeline", language.default_timeline())?,
        payment_terms: text_or(object, "payment_terms", language.default_payment_terms())?,
        conclusion: text_or(object, "conclusion", "")?,
    })
}

fn text_or(
    object: &Map<String, Value>,
    field: &'static str,
    fallback: &str,
) -> Result<String, ReconcileError> {
    match text_field(object, field) {
        TextField::Missing => Ok(fallback.to_owned()),
        TextField::Present(text) => Ok(text.to_owned()),
        TextField::Invalid => Err(ReconcileError::MalformedField { field }),
    }
}
