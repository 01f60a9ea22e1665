use std::fmt;
use std::sync::Arc;

use pm_core::{ChatMessage, ChatModel, Result};

/// One conversation with a model: a system instruction followed by the
/// user/model turns exchanged so far.
pub struct ChatSession {
    model: Arc<dyn ChatModel>,
    history: Vec<ChatMessage>,
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("model", &self.model.name())
            .field("turns", &self.history.len())
            .finish()
    }
}

impl ChatSession {
    pub fn new(model: Arc<dyn ChatModel>, system_instruction: impl Into<String>) -> Self {
        Self {
            model,
            history: vec![ChatMessage::system(system_instruction)],
        }
    }

    /// Send a user message and wait for the reply. Both turns are recorded
    /// only when the model answers; errors leave the history untouched.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String> {
        self.history.push(ChatMessage::user(text));
        match self.model.complete(&self.history).await {
            Ok(reply) => {
                self.history.push(ChatMessage::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pm_core::{Error, Role};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct EchoModel {
        seen: Mutex<Vec<usize>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().unwrap().push(messages.len());
            if self.fail {
                return Err(Error::Inference("boom".to_string()));
            }
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(format!("echo: {}", last))
        }
    }

    #[tokio::test]
    async fn test_send_accumulates_history() {
        let model = Arc::new(EchoModel::default());
        let mut session = ChatSession::new(model.clone(), "system");

        assert_eq!(session.send("one").await.unwrap(), "echo: one");
        assert_eq!(session.send("two").await.unwrap(), "echo: two");

        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Model, Role::User, Role::Model]
        );
        assert_eq!(session.history()[0].content, "system");
        // The model sees the whole conversation each time.
        assert_eq!(*model.seen.lock().unwrap(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_failed_send_leaves_history_untouched() {
        let model = Arc::new(EchoModel {
            fail: true,
            ..EchoModel::default()
        });
        let mut session = ChatSession::new(model, "system");

        let err = session.send("one").await.unwrap_err();
        assert_eq!(err.to_string(), "Inference error: boom");
        assert_eq!(session.history().len(), 1);
    }
}
