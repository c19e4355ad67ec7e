//! Notification outcome types.
//!
//! Delivery failure is an explicit value, not an error: the pipeline consumes
//! `Failed` with a fixed ignore-and-continue policy, so the type system makes
//! the fail-open branch visible instead of hiding it in a catch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single notification delivery attempt.
///
/// Exactly one attempt is made per call; there is no queue and no retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// The message was handed to the channel.
    Delivered,
    /// The channel rejected or never received the message.
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered => write!(f, "delivered"),
            DeliveryOutcome::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_delivered() {
        assert!(DeliveryOutcome::Delivered.is_delivered());
        assert!(
            !DeliveryOutcome::Failed {
                reason: "relay unreachable".to_string()
            }
            .is_delivered()
        );
    }

    #[test]
    fn test_display_carries_reason() {
        let outcome = DeliveryOutcome::Failed {
            reason: "authentication rejected".to_string(),
        };
        assert_eq!(outcome.to_string(), "failed: authentication rejected");
    }
}
