//! Configuration.
//!
//! Read from a TOML file, then overridden by `SHOPWATCH_*` environment
//! variables, then by command line flags. The file is looked up in order:
//! `--config`, `$SHOPWATCH_CONFIG`, `./config.toml`, the platform config dir.
//! A missing file is fine as long as the environment supplies the key and shops.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::CommonArgs;
use crate::error::ConfigError;
use crate::fetch::client::DEFAULT_BASE_URL;

const APP_NAME: &str = "shopwatch";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    log_level: Option<String>,
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    shops: ShopsSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    key: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShopsSection {
    ids: Option<ShopIds>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageSection {
    data_dir: Option<PathBuf>,
}

/// `ids = "1, 2"` and `ids = ["1", "2"]` are both accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShopIds {
    List(Vec<String>),
    Csv(String),
}

impl ShopIds {
    fn into_vec(self) -> Vec<String> {
        match self {
            ShopIds::List(ids) => ids,
            ShopIds::Csv(s) => split_shop_ids(&s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub shop_ids: Vec<String>,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub json_output: bool,
}

impl Config {
    /// Load and merge file, environment and flags. Does not validate.
    pub fn load(args: &CommonArgs) -> Result<Self, ConfigError> {
        let env_config = std::env::var_os("SHOPWATCH_CONFIG").map(PathBuf::from);
        let explicit = args.config.clone().or(env_config);

        let mut config = match locate(explicit.as_deref()) {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
                Config::from_toml(&contents, &path)?
            }
            None => Config::from_file(FileConfig::default()),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_args(args);
        Ok(config)
    }

    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Config::from_file(file))
    }

    fn from_file(file: FileConfig) -> Self {
        let data_dir = file.storage.data_dir.unwrap_or_else(default_data_dir);

        Config {
            api_key: file.api.key.unwrap_or_default(),
            api_base_url: file
                .api
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            shop_ids: file.shops.ids.map(ShopIds::into_vec).unwrap_or_default(),
            data_dir,
            log_level: file.log_level.unwrap_or_else(|| "info".to_string()),
            json_output: false,
        }
    }

    /// Overrides from `SHOPWATCH_*` variables, looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SHOPWATCH_API_KEY") {
            self.api_key = val;
        }
        if let Some(val) = lookup("SHOPWATCH_API_BASE_URL") {
            self.api_base_url = val;
        }
        if let Some(val) = lookup("SHOPWATCH_SHOP_IDS") {
            self.shop_ids = split_shop_ids(&val);
        }
        if let Some(val) = lookup("SHOPWATCH_DATA_DIR") {
            self.data_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("SHOPWATCH_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    pub fn apply_args(&mut self, args: &CommonArgs) {
        if let Some(shops) = &args.shops {
            self.shop_ids = shops.clone();
        }
        if args.verbose {
            self.log_level = "debug".to_string();
        }
        self.json_output = args.json;
    }

    /// Trim the key and shop ids, drop blank and repeated shops, and make sure
    /// there is something to poll.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.api_key = self.api_key.trim().to_string();
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let mut shop_ids: Vec<String> = Vec::with_capacity(self.shop_ids.len());
        for id in self.shop_ids.iter().map(|s| s.trim()) {
            if !id.is_empty() && !shop_ids.iter().any(|seen| seen == id) {
                shop_ids.push(id.to_string());
            }
        }
        if shop_ids.is_empty() {
            return Err(ConfigError::NoShops);
        }
        self.shop_ids = shop_ids;

        Ok(self)
    }
}

fn split_shop_ids(s: &str) -> Vec<String> {
    s.split(',').map(|id| id.trim().to_string()).collect()
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        // an explicit path that does not exist should fail loudly on read
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from("config.toml");
    if local.is_file() {
        return Some(local);
    }

    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.is_file())
}

/// Platform data dir for snapshots (~/.local/share/shopwatch/snapshots or equivalent),
/// `./data` when the platform has no home directory.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("snapshots"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
