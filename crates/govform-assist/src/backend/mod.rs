//! LLM backends
//!
//! [`LlmBackend`] abstracts the chat completion service. [`OpenAiBackend`]
//! talks to any OpenAI-compatible endpoint; [`MockBackend`] returns canned
//! text for tests.

mod mock;
mod openai;
mod traits;

pub use mock::MockBackend;
pub use openai::{OpenAiBackend, OPENAI_BASE_URL};
pub use traits::*;
