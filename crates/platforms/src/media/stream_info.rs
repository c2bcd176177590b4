use crate::media::StreamHandle;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    // Quality name as exposed by the platform, e.g., "original", "hd"
    pub quality: String,
    // Ranking weight used by hosts to order streams across platforms
    pub priority: u32,
    // Group the weight belongs to, e.g., "afreeca"
    pub weight_group: String,
    pub handle: StreamHandle,
}

impl StreamInfo {
    pub fn new(
        quality: impl Into<String>,
        priority: u32,
        weight_group: impl Into<String>,
        handle: StreamHandle,
    ) -> Self {
        Self {
            quality: quality.into(),
            priority,
            weight_group: weight_group.into(),
            handle,
        }
    }

    /// Url a player should open for this stream.
    pub fn url(&self) -> String {
        self.handle.playback_url().to_string()
    }
}
