//! Configuration module for Comic-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use comic_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("comics.toml")).unwrap();
//! println!("Will crawl {} comics", config.comics.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ComicEntry, Config, HttpConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

use crate::ConfigError;

impl Config {
    /// Returns the configured comics, restricted to `only` when it is non-empty
    ///
    /// Entries keep their configured order. A title in `only` that matches no
    /// entry is an error.
    pub fn select_comics(&self, only: &[String]) -> Result<Vec<&ComicEntry>, ConfigError> {
        if only.is_empty() {
            return Ok(self.comics.iter().collect());
        }

        if let Some(unknown) = only
            .iter()
            .find(|title| !self.comics.iter().any(|c| &c.title == *title))
        {
            return Err(ConfigError::UnknownComic(unknown.clone()));
        }

        Ok(self
            .comics
            .iter()
            .filter(|c| only.contains(&c.title))
            .collect())
    }
}
