//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! provider-agnostic [`StreamEvent`] enum defined in `orderdesk-types`.
//!
//! Empty content deltas are forwarded as empty `TextDelta` events rather
//! than filtered: the pipeline emits one observable snapshot per fragment,
//! and that cadence must survive chunks that carry no new text.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use async_openai::types::chat::{ChatCompletionResponseStream, FinishReason};

use orderdesk_types::llm::{LlmError, StopReason, StreamEvent, Usage};

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of
/// [`StreamEvent`]s.
///
/// The returned stream emits events in this order:
/// 1. `Connected` -- immediately on entry
/// 2. `TextDelta` -- for each content chunk, including empty ones
/// 3. `MessageDelta` -- with the stop reason when finish_reason appears
/// 4. `Usage` -- token usage (requires `stream_options.include_usage = true`)
/// 5. `Done` -- at the end of the stream
pub fn map_openai_stream(
    stream: ChatCompletionResponseStream,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        let mut stream = stream;
        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| LlmError::Stream(e.to_string()))?;

            // The final chunk carries usage with an empty choices array.
            if let Some(usage) = chunk.usage.as_ref() {
                yield StreamEvent::Usage(Usage {
                    input_tokens: usage.prompt_tokens,
                    output_tokens: usage.completion_tokens,
                });
            }

            for choice in &chunk.choices {
                if let Some(text) = choice.delta.content.clone() {
                    yield StreamEvent::TextDelta { text };
                }

                if let Some(finish_reason) = choice.finish_reason.clone() {
                    yield StreamEvent::MessageDelta {
                        stop_reason: map_finish_reason(finish_reason),
                    };
                }
            }
        }

        yield StreamEvent::Done;
    })
}

/// Map the OpenAI finish reason onto the pipeline's stop reasons.
///
/// This domain has no tool calling; everything that is not a length cutoff
/// collapses to an ordinary end of turn.
pub(crate) fn map_finish_reason(finish_reason: FinishReason) -> StopReason {
    match finish_reason {
        FinishReason::Length => StopReason::MaxTokens,
        FinishReason::Stop
        | FinishReason::ContentFilter
        | FinishReason::ToolCalls
        | FinishReason::FunctionCall => StopReason::EndTurn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_to_stop_reason_mapping() {
        assert_eq!(map_finish_reason(FinishReason::Stop), StopReason::EndTurn);
        assert_eq!(
            map_finish_reason(FinishReason::Length),
            StopReason::MaxTokens
        );
        assert_eq!(
            map_finish_reason(FinishReason::ContentFilter),
            StopReason::EndTurn
        );
    }
}
