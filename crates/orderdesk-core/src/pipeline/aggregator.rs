//! Stream aggregation: fragments in, full-text snapshots out.
//!
//! The token source produces incremental fragments with no granularity
//! contract. The aggregator appends each fragment to a [`ReplyAccumulator`]
//! and yields the accumulated text after every fragment -- including empty
//! ones, since downstream display code relies on one snapshot per fragment
//! for a steady refresh cadence.

use async_stream::try_stream;
use futures_util::{Stream, StreamExt};

use orderdesk_types::llm::LlmError;

/// Append-only reply buffer, scoped to one exchange's lifetime.
///
/// `partial` only ever grows; earlier content is never rewritten. Converting
/// into the final reply consumes the accumulator, which is what makes the
/// finalized text immutable.
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    partial: String,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment verbatim and return the accumulated text.
    pub fn push(&mut self, fragment: &str) -> &str {
        self.partial.push_str(fragment);
        &self.partial
    }

    /// The text assembled so far.
    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Consume the accumulator, yielding the immutable assembled reply.
    pub fn into_reply(self) -> String {
        self.partial
    }
}

/// Turn a fragment stream into a snapshot stream.
///
/// Yields exactly one snapshot per input fragment, in arrival order; the
/// final snapshot equals the ordered concatenation of all fragments. A
/// mid-stream fragment error propagates to the caller and ends the stream;
/// whatever was assembled up to that point stays with the caller's last good
/// snapshot and is never finalized here.
pub fn snapshots<S>(fragments: S) -> impl Stream<Item = Result<String, LlmError>>
where
    S: Stream<Item = Result<String, LlmError>>,
{
    try_stream! {
        let mut accumulator = ReplyAccumulator::new();
        let mut fragments = std::pin::pin!(fragments);
        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            yield accumulator.push(&fragment).to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn ok_fragments(parts: &[&str]) -> Vec<Result<String, LlmError>> {
        parts.iter().map(|p| Ok(p.to_string())).collect()
    }

    #[tokio::test]
    async fn test_snapshots_grow_monotonically() {
        let input = stream::iter(ok_fragments(&["Hel", "lo", "!"]));
        let collected: Vec<String> = snapshots(input)
            .map(|s| s.unwrap())
            .collect::<Vec<_>>()
            .await;
        assert_eq!(collected, vec!["Hel", "Hello", "Hello!"]);
    }

    #[tokio::test]
    async fn test_final_snapshot_equals_concatenation() {
        let parts = ["a", "", "bc", "d", ""];
        let input = stream::iter(ok_fragments(&parts));
        let collected: Vec<String> = snapshots(input)
            .map(|s| s.unwrap())
            .collect::<Vec<_>>()
            .await;
        assert_eq!(collected.last().map(String::as_str), Some("abcd"));
    }

    #[tokio::test]
    async fn test_one_snapshot_per_fragment_including_empty() {
        let input = stream::iter(ok_fragments(&["x", "", "", "y"]));
        let collected: Vec<String> = snapshots(input)
            .map(|s| s.unwrap())
            .collect::<Vec<_>>()
            .await;
        // Empty fragments still produce an observable (no-op) snapshot.
        assert_eq!(collected, vec!["x", "x", "x", "xy"]);
    }

    #[tokio::test]
    async fn test_empty_input_yields_no_snapshots() {
        let input = stream::iter(ok_fragments(&[]));
        let collected: Vec<_> = snapshots(input).collect().await;
        assert!(collected.is_empty());
    }

    #[tokio::test]
    async fn test_mid_stream_error_propagates_after_partial() {
        let input = stream::iter(vec![
            Ok("par".to_string()),
            Ok("tial".to_string()),
            Err(LlmError::Stream("connection reset".to_string())),
            Ok("never seen".to_string()),
        ]);
        let collected: Vec<Result<String, LlmError>> = snapshots(input).collect().await;
        assert_eq!(collected.len(), 3);
        assert_eq!(collected[1].as_deref().unwrap(), "partial");
        assert!(collected[2].is_err());
    }

    #[test]
    fn test_accumulator_append_only() {
        let mut acc = ReplyAccumulator::new();
        acc.push("Hel");
        assert_eq!(acc.partial(), "Hel");
        acc.push("lo");
        assert_eq!(acc.partial(), "Hello");
        assert_eq!(acc.into_reply(), "Hello");
    }
}
