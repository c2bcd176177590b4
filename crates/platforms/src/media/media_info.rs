use rustc_hash::FxHashMap;

use super::stream_info::StreamInfo;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
/// Represents the result of resolving a channel page.
///
/// # Fields
///
/// * `site_url` - The page URL that was resolved
/// * `artist` - The channel identifier of the broadcaster
/// * `is_live` - Whether at least one playable stream was found
/// * `streams` - Playable streams, in the platform's preference order
/// * `headers` - Optional HTTP headers a player should send (User-Agent, ...)
///
/// # Examples
///
/// ```rust
/// use afreeca_parser::media::media_info::MediaInfo;
///
/// let media = MediaInfo::builder("https://play.afreecatv.com/someuser", "someuser")
///     .is_live(false)
///     .build();
/// assert!(media.streams.is_empty());
/// ```
pub struct MediaInfo {
    pub site_url: String,
    pub artist: String,
    pub is_live: bool,
    pub streams: Vec<StreamInfo>,
    pub headers: Option<FxHashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct MediaInfoBuilder {
    site_url: String,
    artist: String,
    is_live: bool,
    streams: Vec<StreamInfo>,
    headers: Option<FxHashMap<String, String>>,
}

impl MediaInfo {
    pub fn builder(site_url: impl Into<String>, artist: impl Into<String>) -> MediaInfoBuilder {
        MediaInfoBuilder::new(site_url, artist)
    }
}

impl MediaInfoBuilder {
    pub fn new(site_url: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            artist: artist.into(),
            is_live: false,
            streams: Vec::new(),
            headers: None,
        }
    }

    pub fn is_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }

    pub fn streams(mut self, streams: Vec<StreamInfo>) -> Self {
        self.streams = streams;
        self
    }

    pub fn headers(mut self, headers: FxHashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn build(self) -> MediaInfo {
        MediaInfo {
            site_url: self.site_url,
            artist: self.artist,
            is_live: self.is_live,
            streams: self.streams,
            headers: self.headers,
        }
    }
}
