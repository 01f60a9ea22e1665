use chrono::{Local, NaiveDate};
use pm_core::{
    extract_json, render, Article, ArticleStorage, ChatModel, DirectiveKey, EmailRecord,
    MasterDirectives, Notifier, TopicRecord,
};
use pm_inference::ChatSession;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{CycleError, Stage, StageExt};
use crate::logging::Logger;

/// Only this many characters of the article go into the reporting prompt.
pub const ARTICLE_EXCERPT_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub topic: TopicRecord,
    pub article_path: PathBuf,
    pub email: EmailRecord,
    pub delivery: Delivery,
}

/// Runs the topic → outline → article → report sequence against one model.
pub struct CycleManager {
    directives: Arc<MasterDirectives>,
    model: Arc<dyn ChatModel>,
    storage: Arc<dyn ArticleStorage>,
    notifier: Arc<dyn Notifier>,
    notify_on_failure: bool,
    logger: Logger,
}

impl fmt::Debug for CycleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CycleManager")
            .field("model", &self.model.name())
            .field("storage", &"<dyn ArticleStorage>")
            .field("notifier", &"<dyn Notifier>")
            .field("notify_on_failure", &self.notify_on_failure)
            .finish()
    }
}

impl CycleManager {
    pub fn new(
        directives: Arc<MasterDirectives>,
        model: Arc<dyn ChatModel>,
        storage: Arc<dyn ArticleStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directives,
            model,
            storage,
            notifier,
            notify_on_failure: false,
            logger: Logger::new().with_prefix("[cycle]"),
        }
    }

    /// Also email a short failure notice when a cycle aborts.
    pub fn with_failure_alerts(mut self, enabled: bool) -> Self {
        self.notify_on_failure = enabled;
        self
    }

    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        self.run_cycle_on(Local::now().date_naive()).await
    }

    /// One full cycle with a fresh chat session. The article is dated `today`.
    pub async fn run_cycle_on(&self, today: NaiveDate) -> Result<CycleReport, CycleError> {
        let mut session = ChatSession::new(self.model.clone(), self.directives.system_instruction());

        self.logger.info("🧭 Step 1: Generating new topic...");
        let command = self.directives.command(DirectiveKey::DailyTopicGeneration).at(Stage::Topic)?;
        let reply = session.send(command).await.at(Stage::Topic)?;
        let topic_value = extract_json(&reply).at(Stage::Topic)?;
        let topic = TopicRecord::from_value(&topic_value).at(Stage::Topic)?;
        self.logger.info(&format!("✨ Generated title: {}", topic.title));

        self.logger.info("🗂️ Step 2: Generating outline...");
        let template = self.directives.command(DirectiveKey::DeepResearchAndOutline).at(Stage::Outline)?;
        let prompt = render(
            template,
            &[("title", topic.title.as_str()), ("abstract", topic.r#abstract.as_str())],
        )
        .at(Stage::Outline)?;
        let outline = session.send(prompt).await.at(Stage::Outline)?;
        self.logger.info("✨ Outline generated");

        self.logger.info("✍️ Step 3: Writing full article...");
        let template = self.directives.command(DirectiveKey::FullArticleComposition).at(Stage::Article)?;
        let prompt = render(template, &[("outline", outline.as_str())]).at(Stage::Article)?;
        let article_text = session.send(prompt).await.at(Stage::Article)?;
        self.logger.info("✨ Article composition complete");

        let article = Article::new(topic.title.clone(), article_text, today);
        let article_path = self.storage.store_article(&article).await.at(Stage::Persist)?;
        self.logger.info(&format!("💾 Article saved to {}", article_path.display()));

        self.logger.info("📝 Step 4: Generating email report...");
        let template = self
            .directives
            .command(DirectiveKey::ReportingAndSummarization)
            .at(Stage::Report)?;
        let excerpt = excerpt(&article.content);
        let prompt = render(
            template,
            &[("title", topic.title.as_str()), ("full_article_text", excerpt.as_str())],
        )
        .at(Stage::Report)?;
        let reply = session.send(prompt).await.at(Stage::Report)?;
        let email_value = extract_json(&reply).at(Stage::Report)?;
        let email = EmailRecord::from_value(&email_value, &topic).at(Stage::Report)?;

        let delivery = match self.notifier.notify(&email.subject, &email.body).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                self.logger.warn(&format!("📭 Email delivery failed: {}", e));
                Delivery::Failed(e.to_string())
            }
        };

        Ok(CycleReport {
            topic,
            article_path,
            email,
            delivery,
        })
    }

    /// Top-level boundary for a cycle: failures are logged, never propagated.
    pub async fn run_and_log(&self) -> Option<CycleReport> {
        self.logger.info(&format!("🚀 Starting daily research cycle at {}", Local::now()));
        match self.run_cycle().await {
            Ok(report) => {
                self.logger.info(&format!("✅ Cycle complete at {}", Local::now()));
                Some(report)
            }
            Err(e) => {
                self.logger.error(&format!("❌ An error occurred: {}", e));
                if self.notify_on_failure {
                    self.alert(&e).await;
                }
                None
            }
        }
    }

    async fn alert(&self, error: &CycleError) {
        let subject = format!("Research cycle failed during {}", error.stage);
        let body = format!("The research cycle of {} aborted.\n\n{}", Local::now(), error);
        if let Err(e) = self.notifier.notify(&subject, &body).await {
            self.logger.warn(&format!("Failure notice could not be sent: {}", e));
        }
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(ARTICLE_EXCERPT_CHARS).collect()
}
