//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use luckymart_commerce::config::StorefrontConfig;
use tracing::debug;

use crate::config::{load_config, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// An explicit path must load. Otherwise the first config file found in
    /// the working directory or its parents is used, falling back to the
    /// built-in defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (load_config(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => (load_config(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };
        debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Describe where the configuration came from.
    pub fn config_source(&self) -> String {
        self.config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string())
    }
}
