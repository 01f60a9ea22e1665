pub mod models;
pub mod session;

pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_MODEL_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL_NAME.to_string()),
            model_url: Some(DEFAULT_MODEL_URL.to_string()),
        }
    }
}

pub use models::create_model;
pub use session::ChatSession;
