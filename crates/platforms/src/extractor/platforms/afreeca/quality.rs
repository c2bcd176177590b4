use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::extractor::error::ExtractorError;

/// Quality tiers offered by AfreecaTV, in probe order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Original,
    Hd,
    Sd,
}

impl QualityTier {
    /// Probe order. Unrelated to [`QualityTier::weight`].
    pub const ALL: [QualityTier; 3] = [QualityTier::Original, QualityTier::Hd, QualityTier::Sd];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Original => "original",
            QualityTier::Hd => "hd",
            QualityTier::Sd => "sd",
        }
    }

    /// Ranking weight hosts use to compare streams across platforms.
    pub fn weight(&self) -> u32 {
        match self {
            QualityTier::Original => 1080,
            QualityTier::Hd => 720,
            QualityTier::Sd => 480,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ExtractorError::ValidationError(format!("unknown quality `{s}`")))
    }
}
