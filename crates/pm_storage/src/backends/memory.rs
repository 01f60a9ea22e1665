use async_trait::async_trait;
use pm_core::{Article, ArticleStorage, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps articles in memory, keyed by the path the file backend would use.
/// Used for dry runs where nothing should touch the disk.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    root: PathBuf,
    articles: Arc<RwLock<HashMap<PathBuf, Article>>>,
}

impl MemoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            articles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, path: &Path) -> Option<Article> {
        self.articles.read().await.get(path).cloned()
    }

    pub async fn count(&self) -> usize {
        self.articles.read().await.len()
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn store_article(&self, article: &Article) -> Result<PathBuf> {
        let path = self.root.join(article.file_name());
        self.articles.write().await.insert(path.clone(), article.clone());
        tracing::debug!("Kept article in memory as {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_store_and_replace() {
        let storage = MemoryStorage::new("articles");
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let path = storage.store_article(&Article::new("T", "one", date)).await.unwrap();
        assert_eq!(path, PathBuf::from("articles/2025-01-02_T.txt"));

        storage.store_article(&Article::new("T", "two", date)).await.unwrap();
        assert_eq!(storage.count().await, 1);
        assert_eq!(storage.get(&path).await.unwrap().content, "two");
    }
}
