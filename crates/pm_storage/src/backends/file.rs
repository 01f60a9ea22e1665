use async_trait::async_trait;
use pm_core::{Article, ArticleStorage, Result};
use std::path::PathBuf;

/// Writes each article as a UTF-8 text file under the output directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArticleStorage for FileStorage {
    async fn store_article(&self, article: &Article) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(article.file_name());
        tokio::fs::write(&path, article.content.as_bytes()).await?;
        tracing::debug!("Wrote {} bytes to {}", article.content.len(), path.display());
        Ok(path)
    }
}
