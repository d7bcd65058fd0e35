//! The prelude module contains all the things you need to import to work on
//! the API. Every other module starts with `use crate::prelude::*;`.

pub use sqlx::{query, Row};
pub use tracing::{debug, error, info, instrument, trace, warn};

pub use crate::{
	app::AppState,
	models::{
		advertisement::Advertisement,
		error::ErrorType,
		rbac::{AccessRequest, Grants, Resource, ResourceKind, Right},
		user::{Token, User, UserAuthenticationData},
	},
	utils::{
		config::{ApiConfig, AppConfig, DatabaseConfig, RunningEnvironment},
		constants,
	},
};

/// The type of the database connection. A mutable reference to this should
/// be used as the parameter for database functions, since it accepts both a
/// connection and a transaction.
pub type DatabaseConnection = <DatabaseType as sqlx::Database>::Connection;

/// The type of the database. This is currently set to [`sqlx::Sqlite`]. A
/// type alias is used here so that it can be referenced everywhere easily.
pub type DatabaseType = sqlx::Sqlite;
