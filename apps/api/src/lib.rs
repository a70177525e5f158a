//! Mock-interview service: the HTTP API plus the transcript, evaluation and
//! session types a client uses to drive it.

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod interview;
pub mod llm_client;
pub mod resume;
pub mod routes;
pub mod session;
pub mod state;
