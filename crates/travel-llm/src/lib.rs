//! LLM provider abstraction layer for the travel advisor
//!
//! This crate provides provider-agnostic types for single-turn model calls:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait and the [`complete_text`] helper
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::{LLMProvider, complete_text};

// Provider implementations (feature-gated)
#[cfg(feature = "anthropic")]
pub mod providers;
