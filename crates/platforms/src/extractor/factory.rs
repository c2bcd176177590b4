use std::sync::LazyLock;

use super::error::ExtractorError;
use super::platform_extractor::PlatformExtractor;
use crate::extractor::platforms::{self, afreeca::Afreeca};
use regex::Regex;
use reqwest::Client;

// A type alias for a thread-safe constructor function.
type ExtractorConstructor =
    fn(String, Client, Option<serde_json::Value>) -> Box<dyn PlatformExtractor>;

struct PlatformEntry {
    name: &'static str,
    regex: &'static LazyLock<Regex>,
    constructor: ExtractorConstructor,
}

macro_rules! platform_registry {
    ( $( $name:literal : $regex:path => $builder:path ),+ $(,)? ) => {
        &[
            $(
                PlatformEntry {
                    name: $name,
                    regex: &$regex,
                    constructor: |url, client, extras| {
                        Box::new($builder(url, client, extras))
                            as Box<dyn PlatformExtractor>
                    },
                },
            )+
        ]
    };
}

// Static platform registry.
static PLATFORMS: &[PlatformEntry] = platform_registry![
    "afreeca": platforms::afreeca::URL_REGEX => Afreeca::new,
];

/// A factory for creating platform-specific extractors.
pub struct ExtractorFactory {
    client: Client,
}

impl ExtractorFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Names of the platforms this factory dispatches to.
    pub fn supported_platforms() -> impl Iterator<Item = &'static str> {
        PLATFORMS.iter().map(|p| p.name)
    }

    /// Returns the name of the platform claiming `url`, if any.
    pub fn platform_for(url: &str) -> Option<&'static str> {
        PLATFORMS
            .iter()
            .find(|p| p.regex.is_match(url))
            .map(|p| p.name)
    }

    pub fn create_extractor(
        &self,
        url: &str,
        extras: Option<serde_json::Value>,
    ) -> Result<Box<dyn PlatformExtractor>, ExtractorError> {
        PLATFORMS
            .iter()
            .find(|p| p.regex.is_match(url))
            .map(|p| (p.constructor)(url.to_string(), self.client.clone(), extras))
            .ok_or(ExtractorError::UnsupportedExtractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::default::test_client;

    #[test]
    fn dispatches_afreeca_urls() {
        let factory = ExtractorFactory::new(test_client());
        let extractor = factory
            .create_extractor("https://play.afreecatv.com/someuser/251234567", None)
            .unwrap();
        assert_eq!(extractor.get_extractor().platform_name, "AfreecaTV");
        assert_eq!(
            ExtractorFactory::platform_for("http://afreeca.com/someuser"),
            Some("afreeca")
        );
    }

    #[test]
    fn rejects_unknown_urls() {
        let factory = ExtractorFactory::new(test_client());
        assert!(matches!(
            factory.create_extractor("https://www.twitch.tv/someuser", None),
            Err(ExtractorError::UnsupportedExtractor)
        ));
        assert_eq!(ExtractorFactory::platform_for("https://example.com/x"), None);
        assert_eq!(
            ExtractorFactory::supported_platforms().collect::<Vec<_>>(),
            vec!["afreeca"]
        );
    }
}
