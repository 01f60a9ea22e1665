use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use pm_core::{Error, Notifier, Result};
use std::fmt;

pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";
pub const SUBMISSION_PORT: u16 = 587;

const PREVIEW_CHARS: usize = 200;

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
    /// App-specific password, not the account password.
    pub password: String,
    pub recipient: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl SmtpConfig {
    pub fn gmail(sender: String, password: String, recipient: String) -> Self {
        Self {
            host: GMAIL_SMTP_HOST.to_string(),
            port: SUBMISSION_PORT,
            sender,
            password,
            recipient,
        }
    }
}

/// Sends plain-text mail over an authenticated STARTTLS submission session.
pub struct SmtpNotifier {
    from: Mailbox,
    to: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .finish()
    }
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let from = parse_mailbox(&config.sender)?;
        let to = parse_mailbox(&config.recipient)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| Error::Notification(format!("cannot set up SMTP relay {}: {}", config.host, e)))?
            .port(config.port)
            .credentials(Credentials::new(config.sender.clone(), config.password.clone()))
            .build();

        Ok(Self { from, to, transport })
    }

    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message> {
        compose(&self.from, &self.to, subject, body)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| Error::Config(format!("invalid email address '{}': {}", address, e)))
}

fn compose(from: &Mailbox, to: &Mailbox, subject: &str, body: &str) -> Result<Message> {
    Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| Error::Notification(format!("cannot build message: {}", e)))
}

pub(crate) fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        tracing::info!("📧 Sending email to {}", self.to);
        tracing::info!("Subject: {}", subject);
        tracing::info!("Body preview: {}...", preview(body));

        let message = self.build_message(subject, body)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| Error::Notification(format!("email sending failed: {}", e)))?;

        tracing::info!("✉️ Email sent");
        Ok(())
    }
}
