//! Submission notification emails.
//!
//! One email per stored submission: an HTML summary with a plain-text
//! alternative, sent through an SMTP relay. Delivery is best effort; callers
//! log a [`NotifyError`] and carry on.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use log::info;
use maud::{html, Markup, DOCTYPE};

use crate::config::MailSettings;
use crate::error::NotifyError;
use crate::materials::Material;

/// What a notification reports about one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub tracking_code: String,
    pub purchase_order_ref: String,
    pub client_name: String,
    pub materials: Vec<Material>,
}

impl SubmissionSummary {
    pub fn subject(&self) -> String {
        format!("New intake record {}", self.tracking_code)
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &SubmissionSummary) -> Result<(), NotifyError>;
}

pub fn render_html(summary: &SubmissionSummary) -> Markup {
    html! {
        (DOCTYPE)
        html {
            body {
                p {
                    strong { "Purchase order:" } " " (summary.purchase_order_ref)
                    br;
                    strong { "Client:" } " " (summary.client_name)
                    br;
                    strong { "Tracking code:" } " " (summary.tracking_code)
                }
                table border="1" cellspacing="0" cellpadding="4" {
                    tr {
                        th { "Description" }
                        th { "Quantity" }
                    }
                    @for material in &summary.materials {
                        tr {
                            td { (material.description) }
                            td { (material.quantity) }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_text(summary: &SubmissionSummary) -> String {
    let mut text = format!(
        "Purchase order: {}\nClient: {}\nTracking code: {}\n\n",
        summary.purchase_order_ref, summary.client_name, summary.tracking_code
    );
    for material in &summary.materials {
        if material.quantity.is_empty() {
            text.push_str(&format!("- {}\n", material.description));
        } else {
            text.push_str(&format!("- {} x {}\n", material.description, material.quantity));
        }
    }
    text
}

/// Sends notifications through an authenticated STARTTLS relay.
///
/// No connection pool: every email opens its own SMTP session and closes it
/// once the message is accepted.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &MailSettings) -> Result<Self, NotifyError> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|err| NotifyError::Message(format!("invalid sender {}: {err}", settings.from)))?;
        let to: Mailbox = settings
            .to
            .parse()
            .map_err(|err| NotifyError::Message(format!("invalid recipient {}: {err}", settings.to)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }

    fn build_message(&self, summary: &SubmissionSummary) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(summary.subject())
            .multipart(MultiPart::alternative_plain_html(
                render_text(summary),
                render_html(summary).into_string(),
            ))
            .map_err(|err| NotifyError::Message(err.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, summary: &SubmissionSummary) -> Result<(), NotifyError> {
        let message = self.build_message(summary)?;
        self.transport.send(message).await?;
        info!(
            target: "intake::notify",
            "notification for {} sent to {}",
            summary.tracking_code, self.to
        );
        Ok(())
    }
}

/// Installed when no mail settings are configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _summary: &SubmissionSummary) -> Result<(), NotifyError> {
        Err(NotifyError::Disabled)
    }
}
