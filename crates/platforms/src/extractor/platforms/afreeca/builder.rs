use std::sync::LazyLock;

use async_trait::async_trait;
use futures::{Stream, TryStreamExt, stream};
use regex::Regex;
use reqwest::{Client, Response, header};
use tracing::{debug, info, warn};

use crate::{
    extractor::{
        error::{ApiCall, ExtractorError},
        platform_configs::AfreecaConfig,
        platform_extractor::{Extractor, PlatformExtractor},
        platforms::afreeca::{
            models::{
                ChannelInfo, LiveChannel, StreamLocation, parse_channel_response,
                parse_stream_location,
            },
            quality::QualityTier,
        },
        utils::capture_named_or_invalid_url,
    },
    media::{MediaInfo, StreamHandle, StreamInfo},
};

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:\w+\.)?afreeca(?:tv)?\.com/(?P<username>\w+)(?:/\d+)?").unwrap()
});

/// Weight group reported alongside tier weights.
pub const WEIGHT_GROUP: &str = "afreeca";

/// Ranking weight for a stream name, for hosts ordering streams across
/// platforms. Unknown names return `None` so the host can apply its own rule.
pub fn stream_weight(key: &str) -> Option<(u32, &'static str)> {
    key.parse::<QualityTier>()
        .ok()
        .map(|tier| (tier.weight(), WEIGHT_GROUP))
}

pub struct Afreeca {
    pub extractor: Extractor,
    api_url: String,
}

enum ResolveState {
    Pending,
    Probing {
        channel: LiveChannel,
        tiers: std::array::IntoIter<QualityTier, 3>,
    },
}

impl Afreeca {
    pub const CHANNEL_API_URL: &str = "http://live.afreecatv.com:8057/afreeca/player_live_api.php";
    const STREAM_INFO_PATH: &str = "broad_stream_assign.html";

    pub fn new(url: String, client: Client, extras: Option<serde_json::Value>) -> Self {
        let config = AfreecaConfig::from_extras(extras.as_ref());
        let mut extractor = Extractor::new("AfreecaTV", url, client);
        if let Some(user_agent) = &config.user_agent {
            extractor.add_header_typed(header::USER_AGENT, user_agent);
        }
        Self {
            extractor,
            api_url: config
                .api_url
                .unwrap_or_else(|| Self::CHANNEL_API_URL.to_string()),
        }
    }

    pub fn can_handle_url(url: &str) -> bool {
        URL_REGEX.is_match(url)
    }

    /// The channel identifier (`bid`) from the page URL.
    pub fn extract_bid(&self) -> Result<&str, ExtractorError> {
        capture_named_or_invalid_url(&URL_REGEX, &self.extractor.url, "username")
    }

    async fn read_body(call: ApiCall, response: Response) -> Result<String, ExtractorError> {
        let response = response
            .error_for_status()
            .map_err(|e| ExtractorError::transport(call, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| ExtractorError::transport(call, e))?;
        debug!(%call, body = %body, "api response");
        Ok(body)
    }

    async fn post_player_api(
        &self,
        call: ApiCall,
        form: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<ChannelInfo, ExtractorError> {
        let mut request = self.extractor.post(&self.api_url).form(form);
        if let Some(referer) = referer {
            request = request.header(header::REFERER, referer);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ExtractorError::transport(call, e))?;
        let body = Self::read_body(call, response).await?;
        parse_channel_response(&body).map_err(|e| Self::malformed(call, e))
    }

    /// Landing call: reports whether the channel is on air.
    pub async fn get_channel_info(&self, bid: &str) -> Result<ChannelInfo, ExtractorError> {
        self.post_player_api(
            ApiCall::ChannelInfo,
            &[("bid", bid), ("mode", "landing"), ("player_type", "html5")],
            None,
        )
        .await
    }

    /// Requests the playback key for one quality tier.
    pub async fn get_hls_key(
        &self,
        bno: &str,
        bid: &str,
        tier: QualityTier,
    ) -> Result<ChannelInfo, ExtractorError> {
        self.post_player_api(
            ApiCall::StreamKey(tier),
            &[
                ("bid", bid),
                ("bno", bno),
                ("pwd", ""),
                ("quality", tier.as_str()),
                ("type", "pwd"),
            ],
            Some(self.extractor.url.as_str()),
        )
        .await
    }

    pub async fn get_stream_info(
        &self,
        bno: &str,
        tier: QualityTier,
        cdn: &str,
        rmd: &str,
    ) -> Result<StreamLocation, ExtractorError> {
        let call = ApiCall::StreamLocation(tier);
        let url = format!("{}/{}", rmd.trim_end_matches('/'), Self::STREAM_INFO_PATH);
        let broad_key = format!("{bno}-flash-{tier}-hls");
        let response = self
            .extractor
            .get(&url)
            .query(&[("return_type", cdn), ("broad_key", broad_key.as_str())])
            .send()
            .await
            .map_err(|e| ExtractorError::transport(call, e))?;
        let body = Self::read_body(call, response).await?;
        parse_stream_location(&body).map_err(|e| Self::malformed(call, e))
    }

    fn malformed(call: ApiCall, e: serde_json::Error) -> ExtractorError {
        warn!(%call, error = %e, "malformed api response");
        ExtractorError::malformed(call, e)
    }

    /// Fetches the channel and returns it only if it is live and complete.
    async fn fetch_live_channel(&self) -> Result<Option<LiveChannel>, ExtractorError> {
        let bid = self.extract_bid()?;
        let info = self.get_channel_info(bid).await?;
        let live = info.live_channel(bid);
        if live.is_none() {
            debug!(bid, result = info.result(), "channel is offline or incomplete");
        }
        Ok(live)
    }

    /// Probes a single tier. `Ok(None)` means the tier is unavailable.
    async fn get_hls_stream(
        &self,
        channel: &LiveChannel,
        tier: QualityTier,
    ) -> Result<Option<StreamHandle>, ExtractorError> {
        let key = self.get_hls_key(&channel.bno, &channel.bid, tier).await?;
        if !key.is_ok() {
            debug!(%tier, result = key.result(), "key request refused");
            return Ok(None);
        }
        let aid = key.auth_token().ok_or_else(|| {
            ExtractorError::malformed(ApiCall::StreamKey(tier), "RESULT is 1 but AID is missing")
        })?;

        let location = self
            .get_stream_info(&channel.bno, tier, &channel.cdn, &channel.rmd)
            .await?;
        let Some(view_url) = location.view_url else {
            debug!(%tier, status = %location.stream_status, "no view_url");
            return Ok(None);
        };

        Ok(Some(StreamHandle::new(view_url).with_param("aid", aid)))
    }

    /// Lazily resolves every available quality tier, in probe order.
    ///
    /// Each call starts from scratch with fresh requests. Dropping the stream
    /// stops probing. The first fatal error ends the stream.
    pub fn resolve(
        &self,
    ) -> impl Stream<Item = Result<(QualityTier, StreamHandle), ExtractorError>> + Send + '_ {
        stream::try_unfold(ResolveState::Pending, move |state| async move {
            let (channel, mut tiers) = match state {
                ResolveState::Pending => match self.fetch_live_channel().await? {
                    Some(channel) => (channel, QualityTier::ALL.into_iter()),
                    None => return Ok(None),
                },
                ResolveState::Probing { channel, tiers } => (channel, tiers),
            };

            while let Some(tier) = tiers.next() {
                if let Some(handle) = self.get_hls_stream(&channel, tier).await? {
                    info!(bid = %channel.bid, %tier, stream = %handle, "resolved stream");
                    return Ok(Some(((tier, handle), ResolveState::Probing { channel, tiers })));
                }
            }
            Ok::<_, ExtractorError>(None)
        })
    }

    pub async fn resolve_all(&self) -> Result<Vec<(QualityTier, StreamHandle)>, ExtractorError> {
        self.resolve().try_collect().await
    }
}

#[async_trait]
impl PlatformExtractor for Afreeca {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<MediaInfo, ExtractorError> {
        let bid = self.extract_bid()?.to_owned();
        let streams: Vec<StreamInfo> = self
            .resolve_all()
            .await?
            .into_iter()
            .map(|(tier, handle)| StreamInfo::new(tier.as_str(), tier.weight(), WEIGHT_GROUP, handle))
            .collect();

        Ok(MediaInfo::builder(self.extractor.url.clone(), bid)
            .is_live(!streams.is_empty())
            .streams(streams)
            .headers(self.extractor.get_platform_headers_map())
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::default::test_client;
    use rstest::rstest;

    #[rstest]
    #[case("http://afreeca.com/someuser", "someuser")]
    #[case("https://afreecatv.com/some_user", "some_user")]
    #[case("http://play.afreeca.com/someuser/251234567", "someuser")]
    #[case("https://play.afreecatv.com/someuser/251234567", "someuser")]
    #[case("https://bj.afreecatv.com/User123", "User123")]
    #[case("https://play.afreecatv.com/someuser/notanumber", "someuser")]
    #[case("https://play.afreecatv.com/someuser?tab=vod", "someuser")]
    fn matches_channel_urls(#[case] url: &str, #[case] bid: &str) {
        assert!(Afreeca::can_handle_url(url));
        let afreeca = Afreeca::new(url.to_string(), test_client(), None);
        assert_eq!(afreeca.extract_bid().unwrap(), bid);
    }

    #[rstest]
    #[case("ftp://afreecatv.com/someuser")]
    #[case("https://afreecatv.com/")]
    #[case("https://www.twitch.tv/someuser")]
    #[case("https://afreecatv.org/someuser")]
    #[case("https://a.b.afreecatv.com/someuser")]
    #[case("afreecatv.com/someuser")]
    #[case("https://afreecatv.com/-dash")]
    fn rejects_other_urls(#[case] url: &str) {
        assert!(!Afreeca::can_handle_url(url));
        let afreeca = Afreeca::new(url.to_string(), test_client(), None);
        assert!(matches!(
            afreeca.extract_bid(),
            Err(ExtractorError::InvalidUrl(_))
        ));
    }

    #[test]
    fn stream_weight_for_known_tiers() {
        assert_eq!(stream_weight("original"), Some((1080, "afreeca")));
        assert_eq!(stream_weight("hd"), Some((720, "afreeca")));
        assert_eq!(stream_weight("sd"), Some((480, "afreeca")));
        assert_eq!(stream_weight("best"), None);
    }

    #[test]
    fn api_url_comes_from_extras() {
        let afreeca = Afreeca::new(
            "https://play.afreecatv.com/someuser".to_string(),
            test_client(),
            Some(serde_json::json!({"api_url": "http://127.0.0.1:9/api"})),
        );
        assert_eq!(afreeca.api_url, "http://127.0.0.1:9/api");

        let afreeca = Afreeca::new(
            "https://play.afreecatv.com/someuser".to_string(),
            test_client(),
            None,
        );
        assert_eq!(afreeca.api_url, Afreeca::CHANNEL_API_URL);
    }

    #[tokio::test]
    #[ignore]
    async fn test_resolve_live() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        let client = crate::extractor::default_client(None).unwrap();
        let extractor = Afreeca::new(
            "https://play.afreecatv.com/someuser".to_string(),
            client,
            None,
        );
        let media_info = extractor.extract().await.unwrap();
        println!("{media_info:?}");
    }
}
