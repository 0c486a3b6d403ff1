//! LLM wrapper for glass composition extraction using llama.cpp.
//!
//! This crate builds the extraction prompt, hosts a local GGUF model via
//! llama.cpp bindings (feature `llm`), and parses raw generations into the
//! validated schema from `glass-miner-core`.

pub mod extraction;
pub mod host;
pub mod prompts;

pub use extraction::*;
pub use host::*;
pub use prompts::*;
