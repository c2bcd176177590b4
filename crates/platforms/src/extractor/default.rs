use super::error::ExtractorError;
use super::factory::ExtractorFactory;
use reqwest::{Client, ClientBuilder};
use rustls::{ClientConfig, crypto::aws_lc_rs};
use rustls_platform_verifier::BuilderVerifierExt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Installs aws-lc-rs as the process-wide rustls provider.
///
/// Needed before `Client::new()` since reqwest is built without a bundled
/// provider.
pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = aws_lc_rs::default_provider().install_default() {
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// A client builder preconfigured with rustls, the platform certificate
/// verifier and the default request timeout.
pub fn client_builder() -> Result<ClientBuilder, ExtractorError> {
    install_rustls_provider();
    let provider = Arc::new(aws_lc_rs::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ExtractorError::ValidationError(format!("tls protocol versions: {e}")))?
        .with_platform_verifier()
        .map_err(|e| ExtractorError::ValidationError(format!("tls verifier: {e}")))?
        .with_no_client_auth();

    Ok(Client::builder()
        .use_preconfigured_tls(tls_config)
        .timeout(DEFAULT_TIMEOUT))
}

pub fn default_client(timeout: Option<Duration>) -> Result<Client, ExtractorError> {
    let client = client_builder()?
        .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
        .build()?;
    Ok(client)
}

/// Returns a new `ExtractorFactory` backed by [`default_client`].
pub fn default_factory() -> Result<ExtractorFactory, ExtractorError> {
    Ok(ExtractorFactory::new(default_client(None)?))
}

#[cfg(test)]
pub(crate) fn test_client() -> Client {
    install_rustls_provider();
    Client::new()
}
