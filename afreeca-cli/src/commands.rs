use std::path::Path;
use std::time::Duration;

use afreeca_parser::extractor::{
    client_builder,
    error::ExtractorError,
    factory::ExtractorFactory,
    platform_configs::merge_platform_extras,
    platforms::afreeca::{Afreeca, QualityTier},
};
use afreeca_parser::media::MediaInfo;
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, Result},
    output::{OutputManager, write_output},
};

pub struct CommandExecutor {
    config: AppConfig,
    client: Client,
    factory: ExtractorFactory,
    output: OutputManager,
}

pub struct ResolveOptions<'a> {
    pub quality: Option<QualityTier>,
    pub format: Option<OutputFormat>,
    pub output_file: Option<&'a Path>,
    pub api_url: Option<String>,
}

impl CommandExecutor {
    pub fn new(
        config: AppConfig,
        proxy: Option<String>,
        timeout: Option<u64>,
        colored: bool,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(timeout.unwrap_or(config.timeout));
        let mut builder = client_builder()?.timeout(timeout);
        if let Some(proxy) = proxy.or_else(|| config.proxy.clone()) {
            debug!(proxy = %proxy, "using proxy");
            builder = builder.proxy(reqwest::Proxy::all(&proxy).map_err(ExtractorError::from)?);
        }
        let client = builder.build().map_err(ExtractorError::from)?;

        Ok(Self {
            output: OutputManager::new(colored && config.colored),
            factory: ExtractorFactory::new(client.clone()),
            client,
            config,
        })
    }

    pub async fn resolve(&self, url: &str, options: ResolveOptions<'_>) -> Result<()> {
        let overrides = options
            .api_url
            .map(|api_url| serde_json::json!({ "api_url": api_url }));
        let extras = merge_platform_extras(self.config.extras(), overrides);

        let extractor = self
            .factory
            .create_extractor(url, extras)
            .map_err(|_| CliError::UnsupportedUrl(url.to_string()))?;

        info!(url, "resolving");
        let mut media_info = extractor.extract().await?;
        select_quality(&mut media_info, options.quality)?;

        let format = options.format.unwrap_or(self.config.output_format);
        let content = self.output.format_media_info(&media_info, &format)?;
        write_output(&content, options.output_file)
    }

    pub fn check(&self, url: &str) -> Result<()> {
        let platform = ExtractorFactory::platform_for(url)
            .ok_or_else(|| CliError::UnsupportedUrl(url.to_string()))?;
        let afreeca = Afreeca::new(url.to_string(), self.client.clone(), None);
        let bid = afreeca.extract_bid()?;
        write_output(&format!("{platform}: {bid}\n"), None)
    }

    pub fn show_config(&self) -> Result<()> {
        write_output(&self.config.show()?, None)
    }
}

/// Fails with `NoStreamsFound` on an empty result, then narrows the streams
/// to `quality` when one was requested.
fn select_quality(media_info: &mut MediaInfo, quality: Option<QualityTier>) -> Result<()> {
    if media_info.streams.is_empty() {
        return Err(CliError::NoStreamsFound);
    }
    if let Some(quality) = quality {
        media_info.streams.retain(|s| s.quality == quality.as_str());
        if media_info.streams.is_empty() {
            return Err(CliError::QualityUnavailable(quality.to_string()));
        }
    }
    Ok(())
}
