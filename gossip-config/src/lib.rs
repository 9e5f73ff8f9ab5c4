//! Loader for the gossip configuration with YAML + environment overlays.
//!
//! Files and inline snippets are merged in the order they are added, then
//! `GOSSIP__<SECTION>__<KEY>` environment variables are layered on top so the
//! environment always wins. `${VAR}` placeholders inside any string are
//! expanded after merging.
//!
//! Every field has a default, so an empty configuration is valid:
//!
//! ```
//! use gossip_config::GossipConfigLoader;
//!
//! let cfg = GossipConfigLoader::new().with_yaml_str("{}").load().unwrap();
//! assert_eq!(cfg.page.story_container_id, "story-body");
//! assert_eq!(cfg.remote.retries, 2);
//! ```
use config::{Config, ConfigError, Environment, File};
use gossip_common::observability::{LogConfig, LogFormat, expand_home};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_GOSSIP_URL: &str = "https://www.bbc.co.uk/sport/football/gossip";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GossipConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub log: LogSettings,
}

/// Where and how the gossip page is fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

/// Location of the raw HTML store.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_raw_directory")]
    pub raw_directory: String,
}

impl DataConfig {
    /// Root of the date-partitioned raw HTML tree.
    ///
    /// ```
    /// use gossip_config::DataConfig;
    /// use std::path::PathBuf;
    ///
    /// let data = DataConfig {
    ///     directory: PathBuf::from("/srv/gossip"),
    ///     raw_directory: "raw".into(),
    /// };
    /// assert_eq!(data.raw_dir(), PathBuf::from("/srv/gossip/raw"));
    /// ```
    pub fn raw_dir(&self) -> PathBuf {
        expand_home(&self.directory).join(&self.raw_directory)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
            raw_directory: default_raw_directory(),
        }
    }
}

/// Shape of the fetched page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// `id` of the element holding the story paragraphs.
    #[serde(default = "default_story_container_id")]
    pub story_container_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            story_container_id: default_story_container_id(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub stderr: bool,
}

impl LogSettings {
    /// Translate the file settings into the observability initialiser's input.
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            filter: default_log_filter(),
            stderr: false,
        }
    }
}

fn default_url() -> String {
    DEFAULT_GOSSIP_URL.into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_retries() -> usize {
    2
}
fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("gossip").join("data"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
fn default_raw_directory() -> String {
    "raw".into()
}
fn default_story_container_id() -> String {
    "story-body".into()
}
fn default_log_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring (YAML + env overrides).
pub struct GossipConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for GossipConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl GossipConfigLoader {
    /// Start with no sources; the environment overlay is applied in [`Self::load`].
    ///
    /// ```
    /// use gossip_config::GossipConfigLoader;
    ///
    /// let config = GossipConfigLoader::new()
    ///     .with_yaml_str("remote:\n  url: http://localhost:9000/gossip")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.remote.url, "http://localhost:9000/gossip");
    /// assert_eq!(config.remote.timeout_secs, 15);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a file that must exist; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when missing, so a bare environment is enough.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// ```
    /// use gossip_config::GossipConfigLoader;
    ///
    /// unsafe { std::env::set_var("GOSSIP_DOC_HOST", "gossip.example"); }
    ///
    /// let config = GossipConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// remote:
    ///   url: "https://${GOSSIP_DOC_HOST}/football/gossip"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.remote.url, "https://gossip.example/football/gossip");
    ///
    /// unsafe { std::env::remove_var("GOSSIP_DOC_HOST"); }
    /// ```
    pub fn load(self) -> Result<GossipConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("GOSSIP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
