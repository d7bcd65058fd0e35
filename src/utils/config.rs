use std::{
	fmt::{Display, Formatter},
	net::SocketAddr,
};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use time::Duration;

/// The configuration of the application. Read from a JSON file
/// (`config/dev.json` in debug builds, `config.json` otherwise) with every
/// value overridable through `ADBOARD_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
	/// The address and port the server listens on.
	#[serde(rename = "bindaddress")]
	pub bind_address: SocketAddr,
	/// The environment the application is running in.
	pub environment: RunningEnvironment,
	/// The database settings.
	pub database: DatabaseConfig,
	/// The settings of the API itself.
	pub api: ApiConfig,
}

impl AppConfig {
	/// Parses the configuration from the config file and the environment.
	/// Every value has a default, so the application starts without either.
	pub fn parse() -> Result<Self, ConfigError> {
		let env = if cfg!(debug_assertions) {
			"dev".to_string()
		} else {
			std::env::var("ADBOARD_ENV").unwrap_or_else(|_| "prod".into())
		};

		match env.as_ref() {
			"prod" | "production" => Config::builder()
				.add_source(File::with_name("config").required(false))
				.set_default("environment", "production")?,
			"dev" | "development" => Config::builder()
				.add_source(File::with_name("config/dev").required(false))
				.set_default("environment", "development")?,
			_ => {
				panic!("Unknown running environment found!");
			}
		}
		.set_default("bindaddress", "127.0.0.1:3000")?
		.set_default("database.file", "adboard.db")?
		.set_default("database.connectionlimit", 10_i64)?
		.set_default("api.tokenttl", 172_800_i64)?
		.add_source(Environment::with_prefix("ADBOARD").separator("_"))
		.build()?
		.try_deserialize()
	}
}

/// The environment the application is running in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunningEnvironment {
	/// The application is running in development mode, with verbose logging.
	Development,
	/// The application is running in production mode.
	Production,
}

impl Display for RunningEnvironment {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			formatter,
			"{}",
			match self {
				RunningEnvironment::Development => "Development",
				RunningEnvironment::Production => "Production",
			}
		)
	}
}

/// The configuration of the sqlite database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
	/// The path of the database file.
	pub file: String,
	/// The maximum number of connections the pool keeps open.
	#[serde(alias = "connectionlimit")]
	pub connection_limit: u32,
}

/// The settings of the API itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
	/// How long a bearer token stays valid after it was created, in
	/// seconds.
	#[serde(alias = "tokenttl")]
	pub token_ttl: u64,
}

impl ApiConfig {
	/// The validity of a bearer token as a [`Duration`].
	pub fn token_validity(&self) -> Duration {
		Duration::seconds(self.token_ttl as i64)
	}
}
