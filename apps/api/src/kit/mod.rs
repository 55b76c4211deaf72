// Interview kit: request validation, prompt building, generation,
// single-question regeneration, rendering and export.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod render;
pub mod request;

#[cfg(test)]
pub mod fixtures;
