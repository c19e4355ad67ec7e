//! SMTP notifier implementation.
//!
//! Implements `Notifier` from `orderdesk-core` over lettre's async SMTP
//! transport with implicit TLS (SMTPS, port 465 by default). One delivery
//! attempt per call; every failure path collapses into
//! [`DeliveryOutcome::Failed`] so nothing here can abort the pipeline.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use orderdesk_core::notify::Notifier;
use orderdesk_types::config::MailConfig;
use orderdesk_types::error::ConfigError;
use orderdesk_types::notify::DeliveryOutcome;

/// SMTP-backed implementation of `Notifier`.
///
/// Does NOT derive Debug: the transport holds the SMTP credentials.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    default_recipient: Mailbox,
}

impl SmtpNotifier {
    /// Build the notifier from startup configuration.
    ///
    /// Address and host problems are configuration faults and fail here,
    /// at startup -- delivery problems are per-call outcomes, not errors.
    pub fn new(config: &MailConfig) -> Result<Self, ConfigError> {
        let sender: Mailbox = config
            .smtp_login
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(config.smtp_login.clone()))?;
        let default_recipient: Mailbox = config
            .manager_email
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(config.manager_email.clone()))?;

        let credentials = Credentials::new(
            config.smtp_login.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ConfigError::InvalidValue {
                name: "smtp_host".to_string(),
                value: format!("{}: {e}", config.smtp_host),
            })?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender,
            default_recipient,
        })
    }

    /// Assemble the message, resolving `None` to the default recipient.
    fn build_email(
        &self,
        subject: &str,
        body: &str,
        recipient: Option<&str>,
    ) -> Result<Message, String> {
        let to = match recipient {
            Some(addr) => addr
                .parse::<Mailbox>()
                .map_err(|e| format!("invalid recipient '{addr}': {e}"))?,
            None => self.default_recipient.clone(),
        };

        Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| e.to_string())
    }
}

impl Notifier for SmtpNotifier {
    async fn notify(&self, subject: &str, body: &str, recipient: Option<&str>) -> DeliveryOutcome {
        let email = match self.build_email(subject, body, recipient) {
            Ok(email) => email,
            Err(reason) => {
                warn!(%reason, "could not assemble notification");
                return DeliveryOutcome::Failed { reason };
            }
        };

        match self.transport.send(email).await {
            Ok(_) => {
                debug!(subject, "notification delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                warn!(error = %e, subject, "notification delivery failed");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
