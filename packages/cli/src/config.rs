use serde::{Deserialize, Serialize};
use sqlts_codegen::GeneratorOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "sqlts.config.json";

/// sqlts configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing metadata documents (*.json)
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory generated declarations are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Declaration generator options
    #[serde(default)]
    pub generator: GeneratorOptions,
}

fn default_src_dir() -> String {
    "queries".to_string()
}

fn default_out_dir() -> String {
    "types".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config_path = root.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.generator.validate()?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the metadata directory
    pub fn get_src_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.src_dir)
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            generator: GeneratorOptions::default(),
        }
    }
}
