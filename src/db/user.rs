use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the user tables
#[instrument(skip(connection))]
pub async fn initialize_user_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up user tables");

	query(
		r#"
		CREATE TABLE user(
			id INTEGER PRIMARY KEY,
			username TEXT NOT NULL UNIQUE,
			password TEXT NOT NULL,
			created TEXT NOT NULL,

			CHECK(LENGTH(TRIM(username)) > 0),
			CHECK(LENGTH(username) <= 50)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE token(
			id INTEGER PRIMARY KEY,
			token TEXT NOT NULL UNIQUE,
			user_id INTEGER NOT NULL,
			created TEXT NOT NULL,

			FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Creates a user with an already hashed password and returns its id. Fails
/// with a unique violation when the username is taken.
#[instrument(skip(connection, password))]
pub async fn create_user(
	connection: &mut DatabaseConnection,
	username: &str,
	password: &str,
	created: OffsetDateTime,
) -> Result<i64, sqlx::Error> {
	let result = query(
		r#"
		INSERT INTO user(
			username,
			password,
			created
		)
		VALUES
			($1, $2, $3);
		"#,
	)
	.bind(username)
	.bind(password)
	.bind(created)
	.execute(&mut *connection)
	.await?;

	Ok(result.last_insert_rowid())
}

/// Fetches a user by its id.
#[instrument(skip(connection))]
pub async fn get_user_by_id(
	connection: &mut DatabaseConnection,
	user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
	query(
		r#"
		SELECT
			id,
			username,
			password,
			created
		FROM
			user
		WHERE
			id = $1;
		"#,
	)
	.bind(user_id)
	.fetch_optional(&mut *connection)
	.await?
	.map(|row| {
		Ok(User {
			id: row.try_get::<i64, &str>("id")?,
			username: row.try_get::<String, &str>("username")?,
			password: row.try_get::<String, &str>("password")?,
			created: row.try_get::<OffsetDateTime, &str>("created")?,
		})
	})
	.transpose()
}

/// Fetches a user by its username.
#[instrument(skip(connection))]
pub async fn get_user_by_username(
	connection: &mut DatabaseConnection,
	username: &str,
) -> Result<Option<User>, sqlx::Error> {
	query(
		r#"
		SELECT
			id,
			username,
			password,
			created
		FROM
			user
		WHERE
			username = $1;
		"#,
	)
	.bind(username)
	.fetch_optional(&mut *connection)
	.await?
	.map(|row| {
		Ok(User {
			id: row.try_get::<i64, &str>("id")?,
			username: row.try_get::<String, &str>("username")?,
			password: row.try_get::<String, &str>("password")?,
			created: row.try_get::<OffsetDateTime, &str>("created")?,
		})
	})
	.transpose()
}

/// Updates the username and password hash of a user. Fails with a unique
/// violation when the new username is taken by another account.
#[instrument(skip(connection, password))]
pub async fn update_user(
	connection: &mut DatabaseConnection,
	user_id: i64,
	username: &str,
	password: &str,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		UPDATE
			user
		SET
			username = $2,
			password = $3
		WHERE
			id = $1;
		"#,
	)
	.bind(user_id)
	.bind(username)
	.bind(password)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Deletes a user. Their tokens, advertisements and role assignments go
/// with them through the foreign key cascades.
#[instrument(skip(connection))]
pub async fn delete_user(
	connection: &mut DatabaseConnection,
	user_id: i64,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		DELETE FROM
			user
		WHERE
			id = $1;
		"#,
	)
	.bind(user_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Stores a freshly minted token for the user.
#[instrument(skip(connection, token))]
pub async fn create_token(
	connection: &mut DatabaseConnection,
	user_id: i64,
	token: &str,
	created: OffsetDateTime,
) -> Result<Token, sqlx::Error> {
	query(
		r#"
		INSERT INTO token(
			token,
			user_id,
			created
		)
		VALUES
			($1, $2, $3);
		"#,
	)
	.bind(token)
	.bind(user_id)
	.bind(created)
	.execute(&mut *connection)
	.await?;

	Ok(Token {
		token: token.to_string(),
		user_id,
		created,
	})
}

/// Looks a token up by its opaque string.
#[instrument(skip(connection, token))]
pub async fn get_token(
	connection: &mut DatabaseConnection,
	token: &str,
) -> Result<Option<Token>, sqlx::Error> {
	query(
		r#"
		SELECT
			token,
			user_id,
			created
		FROM
			token
		WHERE
			token = $1;
		"#,
	)
	.bind(token)
	.fetch_optional(&mut *connection)
	.await?
	.map(|row| {
		Ok(Token {
			token: row.try_get::<String, &str>("token")?,
			user_id: row.try_get::<i64, &str>("user_id")?,
			created: row.try_get::<OffsetDateTime, &str>("created")?,
		})
	})
	.transpose()
}
