use serde::{Deserialize, Deserializer, de};
use url::Url;

pub const CHANNEL_RESULT_ERROR: i64 = 0;
pub const CHANNEL_RESULT_OK: i64 = 1;

#[derive(Debug, Deserialize)]
struct ChannelEnvelope {
    #[serde(rename = "CHANNEL")]
    channel: ChannelInfo,
}

/// The `CHANNEL` object returned by the player API.
///
/// The same shape answers both the landing call and the per-quality key call.
/// Optional fields are only exposed when `RESULT` reports success. A missing
/// key is absent; a key that is present must hold a string, `null` included.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    #[serde(rename = "RESULT", deserialize_with = "deserialize_result_code")]
    result: i64,
    #[serde(rename = "BNO", default, deserialize_with = "deserialize_present_text")]
    bno: Option<String>,
    #[serde(rename = "RMD", default, deserialize_with = "deserialize_present_text")]
    rmd: Option<String>,
    #[serde(rename = "CDN", default, deserialize_with = "deserialize_present_text")]
    cdn: Option<String>,
    #[serde(rename = "AID", default, deserialize_with = "deserialize_present_text")]
    aid: Option<String>,
}

/// Everything needed to probe quality tiers of a live broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveChannel {
    pub bid: String,
    pub bno: String,
    pub rmd: String,
    pub cdn: String,
}

impl ChannelInfo {
    pub fn result(&self) -> i64 {
        self.result
    }

    pub fn is_ok(&self) -> bool {
        self.result == CHANNEL_RESULT_OK
    }

    fn field<'a>(&self, value: &'a Option<String>) -> Option<&'a str> {
        if self.is_ok() { value.as_deref() } else { None }
    }

    pub fn broadcast_no(&self) -> Option<&str> {
        self.field(&self.bno)
    }

    pub fn relay_domain(&self) -> Option<&str> {
        self.field(&self.rmd)
    }

    pub fn cdn(&self) -> Option<&str> {
        self.field(&self.cdn)
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.field(&self.aid)
    }

    /// Returns the live broadcast when the channel is on air and every field
    /// needed for tier probing is present and non-empty.
    pub fn live_channel(&self, bid: &str) -> Option<LiveChannel> {
        let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_owned);
        Some(LiveChannel {
            bid: bid.to_owned(),
            bno: non_empty(self.broadcast_no())?,
            rmd: non_empty(self.relay_domain())?,
            cdn: non_empty(self.cdn())?,
        })
    }
}

/// Answer of `broad_stream_assign.html`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StreamLocation {
    /// Absent when the key is missing. A present `null` is malformed.
    #[serde(default, deserialize_with = "deserialize_view_url")]
    pub view_url: Option<Url>,
    pub stream_status: String,
}

/// Parses a player API answer into its `CHANNEL` object.
pub fn parse_channel_response(body: &str) -> Result<ChannelInfo, serde_json::Error> {
    serde_json::from_str::<ChannelEnvelope>(body).map(|envelope| envelope.channel)
}

pub fn parse_stream_location(body: &str) -> Result<StreamLocation, serde_json::Error> {
    serde_json::from_str(body)
}

fn deserialize_result_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("RESULT is not an integer: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("RESULT is not an integer: {s:?}"))),
        other => Err(de::Error::custom(format!(
            "RESULT is not an integer: {other}"
        ))),
    }
}

/// Only called for keys present in the input, so `null` fails like any other
/// non-string value.
fn deserialize_present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

fn deserialize_view_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let url = Url::parse(&raw).map_err(|e| de::Error::custom(format!("view_url {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "rtmp" | "http") {
        return Err(de::Error::custom(format!(
            "view_url has unsupported scheme `{}`",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(de::Error::custom(format!("view_url {raw:?} has no host")));
    }
    Ok(Some(url))
}
