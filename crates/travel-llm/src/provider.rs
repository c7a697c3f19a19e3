//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, LLMError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "anthropic")
    fn name(&self) -> &str;
}

/// Run a completion and return the assistant's trimmed text
///
/// An empty or text-less answer is reported as [`LLMError::UnexpectedResponse`].
pub async fn complete_text(provider: &dyn LLMProvider, request: CompletionRequest) -> Result<String> {
    let response = provider.complete(request).await?;
    debug!(
        provider = provider.name(),
        stop_reason = ?response.stop_reason,
        tokens = response.usage.total(),
        "Completion received"
    );

    let text = response
        .message
        .text()
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(LLMError::UnexpectedResponse(
            "completion contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, StopReason, TokenUsage};
    use mockall::mock;

    mock! {
        Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    fn response(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    #[tokio::test]
    async fn test_complete_text_trims() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(response("  A calm wellness retreat \n")));

        let request = CompletionRequest::builder("m").build();
        let text = complete_text(&provider, request).await.unwrap();
        assert_eq!(text, "A calm wellness retreat");
    }

    #[tokio::test]
    async fn test_complete_text_empty_is_error() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_complete().returning(|_| Ok(response("   ")));

        let request = CompletionRequest::builder("m").build();
        let result = complete_text(&provider, request).await;
        assert!(matches!(result, Err(LLMError::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn test_complete_text_propagates_errors() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(LLMError::AuthenticationFailed));

        let request = CompletionRequest::builder("m").build();
        let result = complete_text(&provider, request).await;
        assert!(matches!(result, Err(LLMError::AuthenticationFailed)));
    }
}
