//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coursebook_site::{BuildConfig, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (coursebook.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_content_dir")]
    content_dir: String,
    #[serde(default = "default_output")]
    output_dir: String,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_heading")]
    heading: String,
    /// Paths to extra CSS stylesheets to inline
    styles: Option<Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output(),
            title: default_title(),
            heading: default_heading(),
            styles: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default = "default_minify")]
    minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_content_dir() -> String {
    ".".to_string()
}
fn default_output() -> String {
    "docs".to_string()
}
fn default_title() -> String {
    BuildConfig::default().title
}
fn default_heading() -> String {
    BuildConfig::default().heading
}
fn default_minify() -> bool {
    true
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}

/// Merge the config file with command-line overrides.
fn build_config(file_config: ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
    BuildConfig {
        content_dir: PathBuf::from(&file_config.site.content_dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output_dir)),
        title: file_config.site.title,
        heading: file_config.site.heading,
        minify: minify.unwrap_or(file_config.build.minify),
        styles: file_config
            .site
            .styles
            .unwrap_or_default()
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        ..Default::default()
    }
}

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building site...");

    let file_config = load_config(config_path)?;
    let config = build_config(file_config, output, minify);

    let result = StaticBuilder::new(config).build()?;

    if !result.skipped.is_empty() {
        tracing::info!("Skipped {} missing lessons", result.skipped.len());
    }

    tracing::info!(
        "Built {} chapters with {} figures in {}ms",
        result.chapters,
        result.figures,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_file.display());

    if let Some(site_dir) = result.output_file.parent() {
        tracing::info!(
            "For GitHub Pages, push {0}/ to the gh-pages branch or publish {0}/ as the Pages source",
            site_dir.display()
        );
    }

    Ok(())
}
