use async_trait::async_trait;
use std::fmt;

use crate::types::ChatMessage;
use crate::Result;

#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate the next model turn for a conversation. The first message may be a system instruction.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
