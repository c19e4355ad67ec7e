//! LlmProvider trait definition.
//!
//! The pipeline's view of the external token source: given a completion
//! request, produce an ordered stream of events. The stream may fail with a
//! transport fault at any point; the pipeline treats that as an abort, and
//! retrying is the caller's business, never this layer's.

use std::pin::Pin;

use futures_util::Stream;

use orderdesk_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Trait for token-source backends (any OpenAI-compatible endpoint, or a
/// test fake).
///
/// Returns a boxed stream because streams need to be object-safe for the
/// [`super::box_provider::BoxLlmProvider`] wrapper.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface", "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
