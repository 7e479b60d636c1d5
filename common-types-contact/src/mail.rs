use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::{
    error::{BuildError, DisplayErrorContext, ProvideErrorMetadata},
    types::{Body, Content, Destination, EmailContent, Message},
};
use axum::async_trait;
use thiserror::Error;

use crate::Render::OutboundEmail;

const CHARSET: &'static str = "UTF-8";

#[derive(Debug, Error)]
pub enum MailError {
    // Display is the provider's own text, this is what ends up in `details`
    #[error("{0}")]
    Provider(String),
    #[error("Email provider did not return a message id")]
    MissingMessageId,
    #[error("Failed to build email: {0}")]
    Build(#[from] BuildError),
}

/// A transactional email provider. Returns the provider's message id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<String, MailError>;
}

pub struct SesMailer {
    client: aws_sdk_sesv2::Client,
}

impl SesMailer {
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;
        Self::from_client(aws_sdk_sesv2::Client::new(&config))
    }

    pub fn from_client(client: aws_sdk_sesv2::Client) -> Self {
        SesMailer { client }
    }
}

fn utf8(data: &str) -> Result<Content, BuildError> {
    Content::builder().data(data).charset(CHARSET).build()
}

// Only `Content` has required fields, the outer builders are infallible
fn simple_message(email: &OutboundEmail) -> Result<Message, BuildError> {
    Ok(Message::builder()
        .subject(utf8(&email.subject)?)
        .body(
            Body::builder()
                .html(utf8(&email.html)?)
                .text(utf8(&email.text)?)
                .build()
        )
        .build())
}

#[async_trait]
impl Mailer for SesMailer {
    #[tracing::instrument(skip(self, email), fields(to=%email.to, reply_to=%email.reply_to))]
    async fn send(&self, email: OutboundEmail) -> Result<String, MailError> {
        let message = simple_message(&email)?;

        let output = self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(
                    Destination::builder()
                        .to_addresses(&email.to)
                        .build()
                )
            .reply_to_addresses(&email.reply_to)
            .content(
                    EmailContent::builder()
                        .simple(message)
                        .build()
                )
            .send()
            .await
            .map_err(|err| {
                let context = DisplayErrorContext(&err).to_string();
                let service_error = err.into_service_error();
                MailError::Provider(service_error.message().map(str::to_owned).unwrap_or(context))
            })?;

        output.message_id()
            .map(str::to_owned)
            .ok_or(MailError::MissingMessageId)
    }
}
