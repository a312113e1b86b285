//! Configuration module for the ordering system.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files with
//! environment variable resolution and provides validation to ensure all
//! required configuration values are properly set.
//!
//! Every section and field has a default, so a missing or empty configuration
//! file yields a runnable service.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the ordering service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the HTTP API server.
	#[serde(default)]
	pub api: ApiConfig,
	/// Configuration for admin authorization.
	#[serde(default)]
	pub admin: AdminConfig,
	/// Configuration for the storage backend.
	#[serde(default)]
	pub storage: StorageConfig,
	/// Configuration for the bundled front-end.
	#[serde(default, rename = "static")]
	pub static_files: StaticConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api: ApiConfig::default(),
			admin: AdminConfig::default(),
			storage: StorageConfig::default(),
			static_files: StaticConfig::default(),
		}
	}
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			host: default_api_host(),
			port: default_api_port(),
		}
	}
}

/// Configuration for admin authorization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
	/// Shared secret required in the `x-admin-token` header on admin routes.
	/// The fallback value is insecure; overriding it is a deployment
	/// responsibility.
	#[serde(default = "default_admin_token")]
	pub token: String,
}

impl Default for AdminConfig {
	fn default() -> Self {
		Self {
			token: default_admin_token(),
		}
	}
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which backend to use: `"sqlite"` or `"memory"`.
	#[serde(default = "default_storage_backend")]
	pub backend: String,
	/// Path of the SQLite database file. Ignored by the memory backend.
	#[serde(default = "default_storage_path")]
	pub path: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			backend: default_storage_backend(),
			path: default_storage_path(),
		}
	}
}

/// Configuration for the bundled front-end.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticConfig {
	/// Directory holding the front-end assets, including `index.html`.
	#[serde(default = "default_static_directory")]
	pub directory: String,
}

impl Default for StaticConfig {
	fn default() -> Self {
		Self {
			directory: default_static_directory(),
		}
	}
}

/// Returns the default API host.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	4000
}

/// Returns the default admin token.
///
/// This is a well-known fallback; deployments are expected to override it via
/// the config file or the ADMIN_TOKEN environment variable.
fn default_admin_token() -> String {
	"changeme123".to_string()
}

/// Returns the default storage backend name.
fn default_storage_backend() -> String {
	"sqlite".to_string()
}

/// Returns the default SQLite database path.
fn default_storage_path() -> String {
	"db.sqlite".to_string()
}

/// Returns the default front-end asset directory.
fn default_static_directory() -> String {
	"public".to_string()
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file.
	///
	/// Environment variables referenced as `${VAR}` or `${VAR:-default}` are
	/// resolved before parsing, and the result is validated.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		contents.parse()
	}

	/// Validates the configuration to ensure all required fields are set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.admin.token.is_empty() {
			return Err(ConfigError::Validation(
				"Admin token cannot be empty".into(),
			));
		}

		if self.storage.backend.is_empty() {
			return Err(ConfigError::Validation(
				"Storage backend cannot be empty".into(),
			));
		}
		if self.storage.backend == "sqlite" && self.storage.path.is_empty() {
			return Err(ConfigError::Validation(
				"Storage path cannot be empty for the sqlite backend".into(),
			));
		}

		if self.static_files.directory.is_empty() {
			return Err(ConfigError::Validation(
				"Static directory cannot be empty".into(),
			));
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// Environment variables are resolved and the configuration is automatically
/// validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
