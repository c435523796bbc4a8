pub mod provider;
pub mod openrouter;
pub mod huggingface;
pub mod local;
pub mod resolver;
pub mod response_parsing;
pub mod transport;
pub mod types;
pub mod catalog;

pub use provider::LLMProvider;
pub use resolver::{Resolution, Resolver};
pub use types::{GenerationRequest, GenerationResult, ProviderAttempt, ProviderKind};
