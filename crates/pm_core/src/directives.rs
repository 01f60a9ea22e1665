use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::{Error, Result};

pub const DIRECTIVES_KEY: &str = "autonomous_operational_directives";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKey {
    DailyTopicGeneration,
    DeepResearchAndOutline,
    FullArticleComposition,
    ReportingAndSummarization,
}

impl DirectiveKey {
    pub const ALL: [DirectiveKey; 4] = [
        DirectiveKey::DailyTopicGeneration,
        DirectiveKey::DeepResearchAndOutline,
        DirectiveKey::FullArticleComposition,
        DirectiveKey::ReportingAndSummarization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKey::DailyTopicGeneration => "directive_1_daily_topic_generation",
            DirectiveKey::DeepResearchAndOutline => "directive_2_deep_research_and_outline",
            DirectiveKey::FullArticleComposition => "directive_3_full_article_composition",
            DirectiveKey::ReportingAndSummarization => "directive_4_reporting_and_summarization",
        }
    }
}

impl fmt::Display for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The master prompt document. Kept whole because it doubles as the system
/// instruction; individual commands are looked up when a step needs them.
#[derive(Debug, Clone)]
pub struct MasterDirectives {
    document: Value,
}

impl MasterDirectives {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("cannot read master prompt {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    pub fn command(&self, key: DirectiveKey) -> Result<&str> {
        self.document
            .get(DIRECTIVES_KEY)
            .and_then(|d| d.get(key.as_str()))
            .and_then(|d| d.get("command"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingDirective(key.to_string()))
    }

    pub fn missing(&self) -> Vec<DirectiveKey> {
        DirectiveKey::ALL
            .into_iter()
            .filter(|key| self.command(*key).is_err())
            .collect()
    }

    /// The whole document serialized as compact JSON.
    pub fn system_instruction(&self) -> String {
        self.document.to_string()
    }
}
