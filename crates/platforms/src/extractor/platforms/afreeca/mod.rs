mod builder;
mod models;
mod quality;

pub use builder::{Afreeca, URL_REGEX, WEIGHT_GROUP, stream_weight};
pub use models::{
    CHANNEL_RESULT_ERROR, CHANNEL_RESULT_OK, ChannelInfo, LiveChannel, StreamLocation,
    parse_channel_response, parse_stream_location,
};
pub use quality::QualityTier;
