//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use cinehub_api::embed::DEFAULT_EMBED_BASE_URL;
use cinehub_browse::Category;
use cinehub_browse::detail::DetailOptions;
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Video-embed service settings.
    #[serde(default)]
    pub embed: EmbedConfig,
    /// Browser settings.
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// TMDB request settings. The API token is read from the environment only.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,
    /// Watch provider region.
    #[serde(default = "default_region")]
    pub region: String,
    /// API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            region: default_region(),
            base_url: None,
        }
    }
}

/// Video-embed service settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedConfig {
    /// Base URL; movie and TV paths are joined onto it.
    #[serde(default = "default_embed_base_url")]
    pub base_url: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: default_embed_base_url(),
        }
    }
}

/// Browser settings.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Category shown at start.
    #[serde(default)]
    pub start_category: Category,
}

fn default_language() -> String {
    String::from("en-US")
}

fn default_region() -> String {
    String::from("US")
}

fn default_embed_base_url() -> String {
    String::from(DEFAULT_EMBED_BASE_URL)
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Parsed embed base URL. A trailing slash is added so paths join
    /// beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if `embed.base_url` is not a valid URL.
    pub fn embed_base_url(&self) -> Result<Url> {
        let mut raw = self.embed.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("invalid embed.base_url: {}", self.embed.base_url))
    }

    /// Parsed TMDB base URL override.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is set but not a valid URL.
    pub fn tmdb_base_url(&self) -> Result<Option<Url>> {
        self.tmdb
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).with_context(|| format!("invalid tmdb.base_url: {raw}"))
            })
            .transpose()
    }

    /// Options for title detail requests.
    #[must_use]
    pub fn detail_options(&self) -> DetailOptions {
        DetailOptions {
            language: self.tmdb.language.clone(),
            region: self.tmdb.region.clone(),
        }
    }
}
