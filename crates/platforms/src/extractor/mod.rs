pub mod error;
pub mod factory;
pub mod platform_configs;
pub mod platform_extractor;
pub mod platforms;
pub mod utils;
mod default;

pub use default::{client_builder, default_client, default_factory, install_rustls_provider};
