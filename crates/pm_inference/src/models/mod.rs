use std::sync::Arc;

use pm_core::{ChatModel, Error, Result};

use crate::{Config, DEFAULT_MODEL_NAME, DEFAULT_MODEL_URL};

pub mod gemini;

pub use gemini::GeminiModel;

pub fn create_model(config: Config) -> Result<Arc<dyn ChatModel>> {
    let api_key = config
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Inference("Gemini API key is required".to_string()))?;
    let model_name = config.model_name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
    let model_url = config.model_url.unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());

    let model = GeminiModel::new(api_key, model_name, &model_url)?;
    tracing::debug!("Created model client: {:?}", model);
    Ok(Arc::new(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let result = create_model(Config::default());
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Inference error: Gemini API key is required"
        );

        let result = create_model(Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        });
        assert!(result.is_err());

        let result = create_model(Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_model_url() {
        let result = create_model(Config {
            api_key: Some("test-key".to_string()),
            model_name: None,
            model_url: Some("not a url".to_string()),
        });
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
