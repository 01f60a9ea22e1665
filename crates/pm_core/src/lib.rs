pub mod directives;
pub mod error;
pub mod extract;
pub mod models;
pub mod notify;
pub mod storage;
pub mod template;
pub mod types;

pub use directives::{DirectiveKey, MasterDirectives};
pub use error::{Error, ParseFailure, Result};
pub use extract::extract_json;
pub use models::ChatModel;
pub use notify::Notifier;
pub use storage::ArticleStorage;
pub use template::render;
pub use types::{sanitize_title, Article, ChatMessage, EmailRecord, Role, TopicRecord};
