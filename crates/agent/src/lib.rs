//! Agent Runtime - LLM-backed quote content generation
//!
//! This crate drives the model side of the quote service:
//! - Builds system and user instructions from a quote request
//! - Calls the text-generation backend (Ollama) once per request
//! - Extracts the JSON object buried in the model's reply
//! - Hands the object to the core reconciler
//!
//! # Architecture
//!
//! The agent follows a fixed pipeline:
//! 1. **Prompting** (`prompts`) - request → `PromptPair`
//! 2. **Generation** (`llm`, `ollama`) - `PromptPair` → raw text
//! 3. **Extraction** (`extract`) - raw text → JSON object
//! 4. **Reconciliation** (`anclora_core::reconcile`) - JSON object → `QuoteContent`
//!
//! `runtime::QuoteGenerator` sequences the steps and classifies failures.
//!
//! # Safety Principle
//!
//! The LLM is strictly a copywriter. It NEVER decides hours, rates or amounts.
//! Those always come from the request.

pub mod extract;
pub mod llm;
pub mod ollama;
pub mod prompts;
pub mod runtime;
pub mod stub;
