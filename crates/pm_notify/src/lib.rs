pub mod log;
pub mod smtp;

pub use log::LogNotifier;
pub use smtp::{SmtpConfig, SmtpNotifier, GMAIL_SMTP_HOST, SUBMISSION_PORT};
