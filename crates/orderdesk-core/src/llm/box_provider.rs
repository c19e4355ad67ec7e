//! BoxLlmProvider -- dynamic dispatch wrapper for LlmProvider.
//!
//! Lets the pipeline hold "some token source" without a generic parameter,
//! so the same pipeline type serves the real provider and test fakes.

use std::pin::Pin;

use futures_util::Stream;

use orderdesk_types::llm::{CompletionRequest, LlmError, StreamEvent};

use super::provider::LlmProvider;

/// Type-erased token source.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProvider + Send + Sync>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a streaming completion request. Returns a stream of events.
    pub fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        self.inner.stream(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    struct SilentProvider;

    impl LlmProvider for SilentProvider {
        fn name(&self) -> &str {
            "silent"
        }

        fn stream(
            &self,
            _request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            Box::pin(futures_util::stream::iter(vec![Ok(StreamEvent::Done)]))
        }
    }

    #[tokio::test]
    async fn test_box_provider_delegates() {
        let provider = BoxLlmProvider::new(SilentProvider);
        assert_eq!(provider.name(), "silent");

        let request = CompletionRequest {
            model: "test".to_string(),
            messages: vec![],
            system: None,
            max_tokens: 16,
            temperature: None,
            top_p: None,
        };
        let events: Vec<_> = provider.stream(request).collect().await;
        assert_eq!(events.len(), 1);
    }
}
