use async_trait::async_trait;
use pm_core::{ChatMessage, ChatModel, Error, MasterDirectives, Notifier, Result};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with canned answers in order and remembers every conversation it was shown.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    /// The user message of each call, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.last().map(|m| m.content.clone()).unwrap_or_default())
            .collect()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Inference("no scripted reply left".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push((subject.to_string(), body.to_string()));
        if self.fail {
            return Err(Error::Notification("535 authentication failed".to_string()));
        }
        Ok(())
    }
}

pub fn directives() -> MasterDirectives {
    MasterDirectives::from_value(json!({
        "persona": "Prof. Mackson, research scientist",
        "autonomous_operational_directives": {
            "directive_1_daily_topic_generation": {
                "command": "Propose today's topic as JSON with title and abstract."
            },
            "directive_2_deep_research_and_outline": {
                "command": "Outline the article '{title}'. Abstract: {abstract}"
            },
            "directive_3_full_article_composition": {
                "command": "Write the full article from this outline:\n{outline}"
            },
            "directive_4_reporting_and_summarization": {
                "command": "Summarize '{title}' as {{\"email_subject\", \"email_body\"}}:\n{full_article_text}"
            }
        }
    }))
}

pub fn directives_without(key: &str) -> MasterDirectives {
    let directives = directives();
    let mut doc: serde_json::Value = serde_json::from_str(&directives.system_instruction()).unwrap();
    doc["autonomous_operational_directives"]
        .as_object_mut()
        .unwrap()
        .remove(key);
    MasterDirectives::from_value(doc)
}
