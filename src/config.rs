use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// File name used when no database is configured.
pub const DEFAULT_DATABASE: &str = "parts_inventory.db";

/// Filter directive used when no log filter is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	pub database_path: PathBuf,
	pub log_filter: String,
}

impl Config {
	/// Reads `PARTS_DATABASE` and `PARTS_LOG`, after loading a `.env` file if
	/// one exists.
	pub fn from_env() -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();

		Self::from_lookup(|key| env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let database_path = lookup("PARTS_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
		if database_path.trim().is_empty() {
			return Err(ConfigError::EmptyDatabasePath);
		}

		let log_filter = lookup("PARTS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
		EnvFilter::try_new(&log_filter).map_err(|_| ConfigError::InvalidLogFilter(log_filter.clone()))?;

		Ok(Self {
			database_path: PathBuf::from(database_path),
			log_filter,
		})
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("PARTS_DATABASE must not be empty")]
	EmptyDatabasePath,

	#[error("Invalid log filter: {0}")]
	InvalidLogFilter(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn test_defaults() {
		let config = Config::from_lookup(lookup_from(&[])).unwrap();

		assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE));
		assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
	}

	#[test]
	fn test_overrides() {
		let config = Config::from_lookup(lookup_from(&[
			("PARTS_DATABASE", "/tmp/garage.db"),
			("PARTS_LOG", "parts_inventory=debug"),
		]))
		.unwrap();

		assert_eq!(config.database_path, PathBuf::from("/tmp/garage.db"));
		assert_eq!(config.log_filter, "parts_inventory=debug");
	}

	#[test]
	fn test_empty_database_path() {
		let result = Config::from_lookup(lookup_from(&[("PARTS_DATABASE", "  ")]));

		assert!(matches!(result, Err(ConfigError::EmptyDatabasePath)));
	}

	#[test]
	fn test_invalid_log_filter() {
		let result = Config::from_lookup(lookup_from(&[("PARTS_LOG", "parts_inventory=loud")]));

		assert!(matches!(result, Err(ConfigError::InvalidLogFilter(_))));
	}
}
