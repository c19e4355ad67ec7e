//! Conversation context assembly.
//!
//! The context is ephemeral: rebuilt fresh for every invocation from
//! caller-supplied inputs, owned solely by the orchestrator, and discarded
//! after finalization. Nothing here is persisted.

use orderdesk_types::llm::{Message, MessageRole};

/// Directive used when the caller supplies a blank strategy.
pub const DEFAULT_STRATEGY: &str = "You are a helpful assistant.";

/// One prior conversation turn, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
}

/// Compose the system directive from its optional components.
///
/// Components are joined with blank-line separators; empty components are
/// skipped entirely, so with no FAQ and no template the directive equals the
/// base strategy verbatim. A blank strategy falls back to
/// [`DEFAULT_STRATEGY`].
pub fn compose_directive(strategy: &str, faq: Option<&str>, template: Option<&str>) -> String {
    let base = strategy.trim();
    let mut directive = if base.is_empty() {
        DEFAULT_STRATEGY.to_string()
    } else {
        base.to_string()
    };

    if let Some(faq) = faq {
        let faq = faq.trim();
        if !faq.is_empty() {
            directive.push_str("\n\nAdditional info from FAQ:\n");
            directive.push_str(faq);
        }
    }

    if let Some(template) = template {
        let template = template.trim();
        if !template.is_empty() {
            directive.push_str("\n\n[Template]: ");
            directive.push_str(template);
        }
    }

    directive
}

/// Ordered prior turns plus the composed directive and the new user message.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    directive: String,
    turns: Vec<Turn>,
}

impl ConversationContext {
    /// Build the context for one invocation.
    ///
    /// Prior history is filtered to `user`/`assistant` roles; anything else
    /// (stray system entries, unknown roles upstream) is dropped. The new
    /// user message becomes the final turn.
    pub fn build(directive: String, history: &[Turn], user_message: &str) -> Self {
        let mut turns: Vec<Turn> = history
            .iter()
            .filter(|t| matches!(t.role, MessageRole::User | MessageRole::Assistant))
            .cloned()
            .collect();

        turns.push(Turn {
            role: MessageRole::User,
            content: user_message.to_string(),
        });

        Self { directive, turns }
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Flatten into provider messages (the directive travels separately as
    /// the request's system field).
    pub fn to_messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .map(|t| Message {
                role: t.role,
                content: t.content.clone(),
            })
            .collect()
    }
}
