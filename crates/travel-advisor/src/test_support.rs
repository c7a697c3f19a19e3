//! Shared test doubles

use mockall::mock;
use travel_llm::{CompletionRequest, CompletionResponse, LLMProvider, Message, StopReason, TokenUsage};

mock! {
    pub Provider {}

    #[async_trait::async_trait]
    impl LLMProvider for Provider {
        async fn complete(&self, request: CompletionRequest) -> travel_llm::Result<CompletionResponse>;
        fn name(&self) -> &str;
    }
}

/// Assistant reply carrying `text`
pub fn reply(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    }
}

/// Provider that answers every call with `text`
pub fn provider_replying(text: &'static str) -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock".to_string());
    provider.expect_complete().returning(move |_| Ok(reply(text)));
    provider
}
