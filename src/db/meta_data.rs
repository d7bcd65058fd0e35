use semver::Version;

use crate::prelude::*;

/// Initializes the meta tables
#[instrument(skip(connection))]
pub async fn initialize_meta_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up meta tables");

	query(
		r#"
		CREATE TABLE meta_data(
			id TEXT PRIMARY KEY,
			value TEXT NOT NULL
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Reads the schema version that the database was created with from the
/// `meta_data` table.
#[instrument(skip(connection))]
pub async fn get_database_version(
	connection: &mut DatabaseConnection,
) -> Result<Version, ErrorType> {
	let rows = query(
		r#"
		SELECT
			id,
			value
		FROM
			meta_data
		WHERE
			id = 'version_major' OR
			id = 'version_minor' OR
			id = 'version_patch';
		"#,
	)
	.fetch_all(&mut *connection)
	.await?;

	let mut version = Version::new(0, 0, 0);

	for row in rows {
		let id = row.try_get::<String, &str>("id")?;
		let value = row.try_get::<String, &str>("value")?.parse::<u64>()?;

		match id.as_str() {
			"version_major" => version.major = value,
			"version_minor" => version.minor = value,
			"version_patch" => version.patch = value,
			_ => (),
		}
	}

	Ok(version)
}
