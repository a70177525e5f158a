// End-of-session scoring.
// One stateless LLM call per evaluation; the result is parsed strictly and never retried.

pub mod evaluator;
pub mod handlers;
pub mod prompts;
