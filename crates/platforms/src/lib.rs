//! Resolves AfreecaTV live channel pages into playable HLS streams.
//!
//! The resolver core lives in [`extractor::platforms::afreeca`]. The
//! [`extractor::factory::ExtractorFactory`] and [`media`] types are the
//! host-facing adapters around it.

pub mod extractor;
pub mod media;
