use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".proptablerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_schema() -> String {
    "./schema.json".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["**/*.properties".to_string()]
}

fn default_locale() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            includes: default_includes(),
            ignores: Vec::new(),
            locale: default_locale(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `includes` or `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        if self.schema.trim().is_empty() {
            anyhow::bail!("'schema' must not be empty");
        }
        Ok(())
    }

    /// Whether `path` (relative to the project root) matches an ignore pattern.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignores
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|p| p.matches_path(path))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
