//! Binder configuration.
//!
//! Configuration is written in TOML. Every key is optional; unset keys keep
//! their defaults, and later sources override earlier ones through
//! [`BinderConfig::merge`].
//!
//! ```toml
//! # Reclassify decimal arguments by magnitude before numeric scoring.
//! recast-decimals = true
//! # Reuse resolutions for repeated (type, name, argument shape) triples.
//! memoize = true
//! # Reject receivers whose type was never imported.
//! require-imports = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;


/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},
}

/// Effective binder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderConfig {
	/// Initial value of the decimal recast toggle.
	pub recast_decimals: bool,
	pub memoize: bool,
	/// When set, receivers must be registered (typically by an import)
	/// before members can be resolved on them.
	pub require_imports: bool,
}

impl Default for BinderConfig {
	fn default() -> Self {
		Self {
			recast_decimals: true,
			memoize: true,
			require_imports: false,
		}
	}
}

/// One configuration source, as written. Absent keys are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConfigLayer {
	pub recast_decimals: Option<bool>,
	pub memoize: Option<bool>,
	pub require_imports: Option<bool>,
}

impl ConfigLayer {
	pub fn parse(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}
}

impl BinderConfig {
	/// Parses a TOML string on top of the defaults.
	pub fn parse(input: &str) -> Result<Self, ConfigError> {
		let mut config = Self::default();
		config.merge(ConfigLayer::parse(input)?);
		Ok(config)
	}

	/// Loads a TOML file on top of the defaults.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let mut config = Self::default();
		config.merge(ConfigLayer::load(path)?);
		Ok(config)
	}

	/// Applies the keys set in `layer`, leaving the rest untouched.
	pub fn merge(&mut self, layer: ConfigLayer) {
		if let Some(recast) = layer.recast_decimals {
			self.recast_decimals = recast;
		}
		if let Some(memoize) = layer.memoize {
			self.memoize = memoize;
		}
		if let Some(require) = layer.require_imports {
			self.require_imports = require;
		}
	}
}
