use std::fmt;

use thiserror::Error;

use crate::extractor::platforms::afreeca::QualityTier;

/// Identifies which upstream API call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    ChannelInfo,
    StreamKey(QualityTier),
    StreamLocation(QualityTier),
}

impl ApiCall {
    pub fn tier(&self) -> Option<QualityTier> {
        match self {
            ApiCall::ChannelInfo => None,
            ApiCall::StreamKey(tier) | ApiCall::StreamLocation(tier) => Some(*tier),
        }
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiCall::ChannelInfo => f.write_str("channel info"),
            ApiCall::StreamKey(tier) => write!(f, "stream key ({tier})"),
            ApiCall::StreamLocation(tier) => write!(f, "stream location ({tier})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("unsupported extractor")]
    UnsupportedExtractor,
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("malformed {call} response: {reason}")]
    MalformedResponse { call: ApiCall, reason: String },
    #[error("{call} request failed: {source}")]
    Transport {
        call: ApiCall,
        #[source]
        source: reqwest::Error,
    },
}

impl ExtractorError {
    pub(crate) fn malformed(call: ApiCall, reason: impl fmt::Display) -> Self {
        ExtractorError::MalformedResponse {
            call,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn transport(call: ApiCall, source: reqwest::Error) -> Self {
        ExtractorError::Transport { call, source }
    }

    /// The upstream call this error is attributed to, if any.
    pub fn api_call(&self) -> Option<ApiCall> {
        match self {
            ExtractorError::MalformedResponse { call, .. }
            | ExtractorError::Transport { call, .. } => Some(*call),
            _ => None,
        }
    }
}
