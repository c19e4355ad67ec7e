//! Pipeline orchestration: context build, streaming, dual write, notify.
//!
//! One invocation walks BUILDING_CONTEXT -> STREAMING -> FINALIZING ->
//! NOTIFYING -> DONE, with ABORTED reachable from STREAMING only. The whole
//! walk is a pull-based generator: it suspends at every yielded snapshot and
//! does nothing further until the caller asks for the next item, so an
//! abandoned stream has no durable side effects.

use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::Utc;
use futures_util::{Stream, StreamExt};
use tracing::{debug, info_span, warn};

use orderdesk_types::config::LlmConfig;
use orderdesk_types::error::PipelineError;
use orderdesk_types::llm::{CompletionRequest, LlmError, StreamEvent};
use orderdesk_types::notify::DeliveryOutcome;
use orderdesk_types::order::ExchangeRecord;

use crate::llm::box_provider::BoxLlmProvider;
use crate::notify::Notifier;
use crate::repository::OrderRepository;
use crate::template::TemplateSet;

use super::aggregator::snapshots;
use super::context::{ConversationContext, Turn, compose_directive};
use super::log::SessionLog;

/// Inputs for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// Caller-supplied contact identifier, may be empty.
    pub contact: String,
    /// The new inbound customer message.
    pub message: String,
    /// Prior conversation turns (filtered to user/assistant roles).
    pub history: Vec<Turn>,
    /// Base strategy text; blank falls back to the default directive.
    pub strategy: String,
    /// Optional template identifier, resolved against the closed registry.
    pub template: Option<String>,
    /// Optional FAQ text merged verbatim into the directive.
    pub faq: Option<String>,
}

/// Items yielded by one pipeline invocation.
///
/// Every fragment produces one `Snapshot` carrying the full reply text so
/// far; after clean exhaustion and the dual write, a single `Completed`
/// carries the finalized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Snapshot { reply: String },
    Completed { record: ExchangeRecord },
}

/// Composes the token source, session log, record store, and notifier into
/// the order-intake pipeline.
///
/// Generic over `OrderRepository` and `Notifier` so tests can substitute
/// in-memory fakes; the token source is type-erased behind
/// [`BoxLlmProvider`] for the same reason.
pub struct OrderPipeline<R: OrderRepository, N: Notifier> {
    provider: BoxLlmProvider,
    store: R,
    log: SessionLog,
    notifier: N,
    templates: TemplateSet,
    llm: LlmConfig,
}

impl<R: OrderRepository, N: Notifier> OrderPipeline<R, N> {
    pub fn new(
        provider: BoxLlmProvider,
        store: R,
        log: SessionLog,
        notifier: N,
        templates: TemplateSet,
        llm: LlmConfig,
    ) -> Self {
        Self {
            provider,
            store,
            log,
            notifier,
            templates,
            llm,
        }
    }

    /// The session log this pipeline appends to.
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Known template names, for front-end display.
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Run one exchange through the pipeline.
    ///
    /// Yields one [`TurnEvent::Snapshot`] per fragment, then -- only after
    /// the token source is cleanly exhausted -- appends the finalized record
    /// to the session log, inserts it into the record store, fires the
    /// best-effort operator notification, and yields
    /// [`TurnEvent::Completed`].
    ///
    /// A token-source fault ends the stream with
    /// [`PipelineError::TokenSource`] and leaves no durable trace. A failed
    /// durable insert ends it with [`PipelineError::Persistence`] after the
    /// session log has already grown (documented divergence). A failed
    /// notification changes nothing observable.
    pub fn respond(
        &self,
        request: TurnRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<TurnEvent, PipelineError>> + Send + '_>> {
        Box::pin(async_stream::try_stream! {
            // BUILDING_CONTEXT
            let template_text = request
                .template
                .as_deref()
                .map(|name| self.templates.resolve(name).into_owned());
            let directive = compose_directive(
                &request.strategy,
                request.faq.as_deref(),
                template_text.as_deref(),
            );
            let context =
                ConversationContext::build(directive, &request.history, &request.message);

            let completion = CompletionRequest {
                model: self.llm.model.clone(),
                messages: context.to_messages(),
                system: Some(context.directive().to_string()),
                max_tokens: self.llm.max_tokens,
                temperature: Some(self.llm.temperature),
                top_p: Some(self.llm.top_p),
            };

            let span = info_span!(
                "gen_ai.respond",
                gen_ai.system = self.provider.name(),
                gen_ai.request.model = %completion.model,
                gen_ai.request.max_tokens = completion.max_tokens,
                gen_ai.request.stream = true,
            );

            // STREAMING
            let events = SpannedStream {
                inner: self.provider.stream(completion),
                span,
            };
            let mut reply = String::new();
            {
                let mut stream = std::pin::pin!(snapshots(fragments(events)));
                while let Some(snapshot) = stream.next().await {
                    // ABORTED on a token-source fault: nothing written, nothing sent.
                    let snapshot = snapshot?;
                    reply.clone_from(&snapshot);
                    yield TurnEvent::Snapshot { reply: snapshot };
                }
            }

            // FINALIZING: log first, then store, unconditionally in that order.
            let record = ExchangeRecord {
                timestamp: Utc::now(),
                contact: request.contact.clone(),
                user_message: request.message.clone(),
                assistant_reply: reply,
            };
            self.log.append(record.clone());
            let id = self.store.insert(&record).await?;
            debug!(id, contact = %record.contact, "order recorded");

            // NOTIFYING: best-effort, outcome consumed here and never surfaced.
            let subject = intake_subject(&record.contact);
            let body = intake_body(&record, &request.strategy, request.template.as_deref());
            match self.notifier.notify(&subject, &body, None).await {
                DeliveryOutcome::Delivered => debug!("operator notified"),
                DeliveryOutcome::Failed { reason } => {
                    warn!(%reason, "operator notification failed; order already recorded");
                }
            }

            // DONE
            yield TurnEvent::Completed { record };
        })
    }

    /// Send an operator-triggered diagnostic message.
    ///
    /// Unlike pipeline notifications there is no background state to
    /// protect, so the outcome -- including failure -- goes straight back to
    /// the caller.
    pub async fn notify_operator(&self, note: Option<&str>) -> DeliveryOutcome {
        let subject = "Manual order-desk notification";
        let body = match note {
            Some(note) => format!("Manual trigger at {}\n\n{note}", now_stamp()),
            None => format!("Manual trigger at {}", now_stamp()),
        };
        self.notifier.notify(subject, &body, None).await
    }
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Subject line for the per-exchange operator notification.
fn intake_subject(contact: &str) -> String {
    let who = if contact.is_empty() { "anonymous" } else { contact };
    format!("New order intake from {who}")
}

/// Body for the per-exchange operator notification.
fn intake_body(record: &ExchangeRecord, strategy: &str, template: Option<&str>) -> String {
    format!(
        "Customer:\n{}\n\nAssistant:\n{}\n\nStrategy:\n{}\nTemplate:\n{}",
        record.user_message,
        record.assistant_reply,
        strategy,
        template.unwrap_or("-"),
    )
}

/// Reduce a provider event stream to its text fragments.
///
/// Empty fragments pass through untouched; bookkeeping events (Connected,
/// Usage, MessageDelta, Done) are dropped.
fn fragments<S>(events: S) -> impl Stream<Item = Result<String, LlmError>> + Send
where
    S: Stream<Item = Result<StreamEvent, LlmError>> + Send,
{
    events.filter_map(|event| async move {
        match event {
            Ok(StreamEvent::TextDelta { text }) => Some(Ok(text)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    })
}

/// A stream wrapper that keeps the gen_ai span alive for the duration of
/// streaming; without it the span would close as soon as the stream is
/// created, before a single fragment arrives.
struct SpannedStream {
    inner: Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>,
    span: tracing::Span,
}

impl Stream for SpannedStream {
    type Item = Result<StreamEvent, LlmError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let _enter = this.span.enter();
        this.inner.as_mut().poll_next(cx)
    }
}
