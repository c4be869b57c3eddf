// Resume analysis: prompt text, the completions contract, and the HTTP handlers.
// All completions calls go through llm_client; nothing here talks to OpenRouter directly.

pub mod handlers;
pub mod prompts;
pub mod service;
