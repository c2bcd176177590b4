pub mod media_info;
pub mod stream_handle;
pub mod stream_info;

pub use media_info::MediaInfo;
pub use stream_handle::StreamHandle;
pub use stream_info::StreamInfo;
