use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Store an article under its derived file name, replacing any previous one
    async fn store_article(&self, article: &Article) -> Result<PathBuf>;
}
