// Interview conversation: transcript model, history reconciliation, turn service.
// All LLM calls go through llm_client; no direct API calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod reconciler;
pub mod service;
