use afreeca_parser::extractor::error::{ApiCall, ExtractorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Extractor(#[from] ExtractorError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),
    #[error("no streams found")]
    NoStreamsFound,
    #[error("quality `{0}` is not available")]
    QualityUnavailable(String),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// The upstream call a resolver error is attributed to.
    pub fn api_call(&self) -> Option<ApiCall> {
        match self {
            CliError::Extractor(e) => e.api_call(),
            _ => None,
        }
    }

    /// Error body printed when the output format is JSON.
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        });
        if let Some(call) = self.api_call() {
            body["call"] = call.to_string().into();
            if let Some(tier) = call.tier() {
                body["quality"] = tier.as_str().into();
            }
        }
        body
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
