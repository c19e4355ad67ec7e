//! Notifier trait definition.
//!
//! One delivery attempt per call, outcome as a value. The pipeline never
//! branches on `Delivered`; it only logs `Failed` and moves on, so a notifier
//! that fails 100% of the time still leaves every exchange fully recorded.

use orderdesk_types::notify::DeliveryOutcome;

/// Trait for the operator-notification side channel.
///
/// Implementations live in orderdesk-infra (e.g., `SmtpNotifier`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait Notifier: Send + Sync {
    /// Attempt exactly one delivery of `(subject, body)` to `recipient`,
    /// falling back to the configured default recipient when `None`.
    ///
    /// No queuing, no retry, no backoff. Transport failures come back as
    /// [`DeliveryOutcome::Failed`], never as a panic or error type.
    fn notify(
        &self,
        subject: &str,
        body: &str,
        recipient: Option<&str>,
    ) -> impl std::future::Future<Output = DeliveryOutcome> + Send;
}
