//! Configuration module for Onpage-SEO
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every value has a default, so an empty file (or no file) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use onpage_seo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("onpage.toml")).unwrap();
//! println!("Title range: {:?}", config.analyzer.title_px);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalyzerConfig, CharWidths, Config, FetcherConfig, Range, ReadabilityConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
