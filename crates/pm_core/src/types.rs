use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self { role: Role::Model, content: content.into() }
    }
}

/// Topic proposed by the first directive. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub title: String,
    pub r#abstract: String,
}

impl TopicRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self {
            title: required_text(value, "title")?,
            r#abstract: required_text(value, "abstract")?,
        })
    }
}

/// Email produced by the reporting directive, with fallbacks taken from the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub subject: String,
    pub body: String,
}

impl EmailRecord {
    /// Missing or non-string fields fall back; a reply that is not an object is an error.
    pub fn from_value(value: &Value, topic: &TopicRecord) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::NotAnObject(value.to_string()));
        }
        let subject = optional_text(value, "email_subject")
            .unwrap_or_else(|| format!("Research Article Complete: {}", topic.title));
        let body = optional_text(value, "email_body").unwrap_or_else(|| topic.r#abstract.clone());
        Ok(Self { subject, body })
    }
}

fn required_text(value: &Value, key: &str) -> Result<String> {
    match value.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(Error::MissingField(key.to_string())),
    }
}

fn optional_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A generated article, dated by the day of the cycle that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub written_on: NaiveDate,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>, written_on: NaiveDate) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            written_on,
        }
    }

    /// `<YYYY-MM-DD>_<sanitized title>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.txt",
            self.written_on.format("%Y-%m-%d"),
            sanitize_title(&self.title)
        )
    }
}

/// Keeps alphanumerics, spaces, underscores and hyphens, trims, then turns spaces into underscores.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim().replace(' ', "_")
}
