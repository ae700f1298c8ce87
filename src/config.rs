//! Configuration management for Phalanx.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parser::FeedFormat;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured threat feeds.
    pub sources: Vec<FeedSource>,

    /// Directory the block-list artifact is written into.
    pub output_path: PathBuf,

    /// File name of the block-list artifact.
    pub output_filename: String,

    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            output_path: PathBuf::from("/var/lib/phalanx"),
            output_filename: "blocklist.json".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.output_filename.is_empty() {
            anyhow::bail!("output_filename must not be empty");
        }
        if self.output_filename.contains('/') {
            anyhow::bail!(
                "output_filename must be a bare file name, not a path: {}",
                self.output_filename
            );
        }

        for source in &self.sources {
            if source.name.is_empty() {
                anyhow::bail!("Feed source with empty name");
            }
            if !source.url.starts_with("https://") && !source.url.starts_with("http://") {
                anyhow::bail!(
                    "Feed '{}' URL must be http(s): {}",
                    source.name,
                    source.url
                );
            }
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// Save configuration to a YAML file atomically (tempfile + rename).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        let parent_dir = path.parent().unwrap_or(Path::new("/etc/phalanx"));
        std::fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", parent_dir))?;
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Sources enabled for this run.
    pub fn enabled_sources(&self) -> Vec<&FeedSource> {
        self.sources.iter().filter(|s| s.enabled).collect()
    }

    /// Full path of the block-list artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_path.join(&self.output_filename)
    }

    /// Default config file with comments, for `phalanx init`.
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }
}

/// One configured threat feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    /// Text layout of this feed, selecting the parser strategy.
    pub format: FeedFormat,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: "dshield".to_string(),
            url: "https://isc.sans.edu/block.txt".to_string(),
            format: FeedFormat::Netblock,
            enabled: true,
        },
        FeedSource {
            name: "talos".to_string(),
            url: "https://talosintelligence.com/documents/ip-blacklist".to_string(),
            format: FeedFormat::LinePerIp,
            enabled: true,
        },
        FeedSource {
            name: "otx".to_string(),
            url: "https://reputation.alienvault.com/reputation.generic".to_string(),
            format: FeedFormat::CommentedIp,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.output_filename, "blocklist.json");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_sources_cover_all_formats() {
        let config = Config::default();
        let formats: Vec<FeedFormat> = config.sources.iter().map(|s| s.format).collect();
        assert!(formats.contains(&FeedFormat::Netblock));
        assert!(formats.contains(&FeedFormat::LinePerIp));
        assert!(formats.contains(&FeedFormat::CommentedIp));
    }

    #[test]
    fn test_artifact_path_joins_dir_and_name() {
        let config = Config::default();
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("/var/lib/phalanx/blocklist.json")
        );
    }

    #[test]
    fn test_enabled_sources_filtering() {
        let mut config = Config::default();
        config.sources[1].enabled = false;
        let enabled = config.enabled_sources();
        assert_eq!(enabled.len(), 2);
        assert!(enabled.iter().all(|s| s.name != "talos"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.sources.len(), config.sources.len());
        assert_eq!(parsed.output_filename, config.output_filename);
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let mut config = Config::default();
        config.sources[0].url = "ftp://example.com/feed".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_filename() {
        let config = Config {
            output_filename: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_path_in_filename() {
        let config = Config {
            output_filename: "../elsewhere.json".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config::default();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.sources.len(), config.sources.len());
    }

    #[test]
    fn test_default_template_parses_and_validates() {
        let config: Config = serde_yaml::from_str(&Config::generate_default_yaml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 3);
    }

    #[test]
    fn test_feed_source_enabled_defaults_to_true() {
        let yaml = r#"
name: test
url: "https://example.com/feed"
format: line-per-ip
"#;
        let source: FeedSource = serde_yaml::from_str(yaml).unwrap();
        assert!(source.enabled);
    }
}
