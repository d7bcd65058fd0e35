use sqlx::{pool::PoolOptions, Pool};

use crate::prelude::*;

/// All advertisement related database functions.
mod advertisement;
/// The `meta_data` table, holding the schema version.
mod meta_data;
/// The role and right tables, grant loading and the bootstrap roles.
mod rbac;
/// The user and token tables.
mod user;

pub use self::{advertisement::*, meta_data::*, rbac::*, user::*};

/// Connects to the database with the given configuration. The database file
/// is created if it does not exist, and foreign keys are enforced on every
/// connection of the pool.
#[instrument(skip(config))]
pub async fn connect(config: &DatabaseConfig) -> Pool<DatabaseType> {
	info!("Connecting to database: `{}`", config.file);
	PoolOptions::<DatabaseType>::new()
		.max_connections(config.connection_limit)
		.connect_with(
			<DatabaseConnection as sqlx::Connection>::Options::new()
				.filename(&config.file)
				.foreign_keys(true)
				.create_if_missing(true),
		)
		.await
		.expect("Failed to connect to database")
}

/// Initializes the database. On a fresh database this creates every table,
/// records the schema version and seeds the bootstrap roles, all in one
/// transaction. On an existing database it only verifies that the stored
/// schema version is the one this binary expects.
#[instrument(skip(app))]
pub async fn initialize(app: &AppState) -> Result<(), ErrorType> {
	info!("Initializing database");

	let tables = query(
		r#"
		SELECT
			*
		FROM
			sqlite_schema
		WHERE
			type = 'table';
		"#,
	)
	.fetch_all(&app.database)
	.await?;

	let mut transaction = app.database.begin().await?;

	if tables.is_empty() {
		warn!("No tables exist. Creating fresh");

		initialize_meta_tables(&mut transaction).await?;
		initialize_user_tables(&mut transaction).await?;
		initialize_rbac_tables(&mut transaction).await?;
		initialize_advertisement_tables(&mut transaction).await?;

		query(
			r#"
			INSERT INTO meta_data(id, value)
			VALUES
				('version_major', $1),
				('version_minor', $2),
				('version_patch', $3);
			"#,
		)
		.bind(constants::DATABASE_VERSION.major.to_string())
		.bind(constants::DATABASE_VERSION.minor.to_string())
		.bind(constants::DATABASE_VERSION.patch.to_string())
		.execute(&mut *transaction)
		.await?;

		seed_bootstrap_roles(&mut transaction).await?;

		transaction.commit().await?;

		info!("Database created");
	} else {
		let version = get_database_version(&mut transaction).await?;

		if version != constants::DATABASE_VERSION {
			return Err(ErrorType::server_error(format!(
				"database is at version `{}`, expected `{}`",
				version,
				constants::DATABASE_VERSION
			)));
		}

		transaction.commit().await?;
	}

	Ok(())
}
