use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A resolved, playable HLS stream.
///
/// `url` is the media URL as handed out by the platform; `params` are the
/// playback parameters (for example the `aid` credential) that must be sent
/// along with every playlist request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub url: Url,
    pub params: BTreeMap<String, String>,
}

impl StreamHandle {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The media URL with `params` appended to its query string.
    ///
    /// Existing query pairs are kept; params are appended in key order.
    pub fn playback_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        url
    }
}

impl fmt::Display for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<HLSStream {}>", self.playback_url())
    }
}
