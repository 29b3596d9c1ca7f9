use async_trait::async_trait;
use aws_sdk_sesv2::types::{Body as SesBody, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

use taskly_atoms::error::EmailError;
use taskly_atoms::reminders::EmailSender;

/// SES-backed implementation of the reminder email port.
pub struct SesMailer {
    client: SesClient,
    sender: String,
}

impl SesMailer {
    pub fn new(client: SesClient, sender: impl Into<String>) -> Self {
        Self {
            client,
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl EmailSender for SesMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let subject = Content::builder()
            .data(subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError(format!("invalid subject: {}", e)))?;
        let text = Content::builder()
            .data(body)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError(format!("invalid body: {}", e)))?;

        let message = Message::builder()
            .subject(subject)
            .body(SesBody::builder().text(text).build())
            .build();
        let content = EmailContent::builder().simple(message).build();

        self.client
            .send_email()
            .from_email_address(&self.sender)
            .destination(Destination::builder().to_addresses(to).build())
            .content(content)
            .send()
            .await
            .map_err(|e| EmailError(format!("SES send_email error: {}", e)))?;

        Ok(())
    }
}
