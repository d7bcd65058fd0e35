use crate::prelude::*;

/// Initializes the role and right tables
#[instrument(skip(connection))]
pub async fn initialize_rbac_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up role and right tables");

	query(
		r#"
		CREATE TABLE role(
			id INTEGER PRIMARY KEY,
			name TEXT NOT NULL UNIQUE,

			CHECK(LENGTH(TRIM(name)) > 0)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	// RIGHT is a reserved word, hence access_right. The stored kind tags are
	// the Display form of ResourceKind.
	query(
		r#"
		CREATE TABLE access_right(
			id INTEGER PRIMARY KEY,
			resource TEXT NOT NULL,
			can_read BOOLEAN NOT NULL DEFAULT FALSE,
			can_write BOOLEAN NOT NULL DEFAULT FALSE,
			only_own BOOLEAN NOT NULL DEFAULT TRUE,

			CHECK(resource IN ('user', 'advertisement', 'right', 'role')),
			UNIQUE(resource, only_own, can_read, can_write)
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE user_role(
			user_id INTEGER NOT NULL,
			role_id INTEGER NOT NULL,

			PRIMARY KEY (user_id, role_id),
			FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE,
			FOREIGN KEY (role_id) REFERENCES role(id) ON DELETE CASCADE
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	query(
		r#"
		CREATE TABLE role_right(
			role_id INTEGER NOT NULL,
			right_id INTEGER NOT NULL,

			PRIMARY KEY (role_id, right_id),
			FOREIGN KEY (role_id) REFERENCES role(id) ON DELETE CASCADE,
			FOREIGN KEY (right_id) REFERENCES access_right(id) ON DELETE CASCADE
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Creates a role and returns its id. Fails with a unique violation when a
/// role with that name already exists.
#[instrument(skip(connection))]
pub async fn create_role(
	connection: &mut DatabaseConnection,
	name: &str,
) -> Result<i64, sqlx::Error> {
	let result = query(
		r#"
		INSERT INTO role(
			name
		)
		VALUES
			($1);
		"#,
	)
	.bind(name)
	.execute(&mut *connection)
	.await?;

	Ok(result.last_insert_rowid())
}

/// Creates a right and returns its id. Fails with a unique violation when a
/// right with the same resource, scope and operation flags already exists.
#[instrument(skip(connection))]
pub async fn create_right(
	connection: &mut DatabaseConnection,
	resource: ResourceKind,
	can_read: bool,
	can_write: bool,
	only_own: bool,
) -> Result<i64, sqlx::Error> {
	let result = query(
		r#"
		INSERT INTO access_right(
			resource,
			can_read,
			can_write,
			only_own
		)
		VALUES
			($1, $2, $3, $4);
		"#,
	)
	.bind(resource)
	.bind(can_read)
	.bind(can_write)
	.bind(only_own)
	.execute(&mut *connection)
	.await?;

	Ok(result.last_insert_rowid())
}

/// Adds a right to a role.
#[instrument(skip(connection))]
pub async fn assign_right_to_role(
	connection: &mut DatabaseConnection,
	role_id: i64,
	right_id: i64,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		INSERT INTO role_right(
			role_id,
			right_id
		)
		VALUES
			($1, $2);
		"#,
	)
	.bind(role_id)
	.bind(right_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Assigns a role to a user.
#[instrument(skip(connection))]
pub async fn assign_role_to_user(
	connection: &mut DatabaseConnection,
	user_id: i64,
	role_id: i64,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		INSERT INTO user_role(
			user_id,
			role_id
		)
		VALUES
			($1, $2);
		"#,
	)
	.bind(user_id)
	.bind(role_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Looks a role up by its name and returns its id.
#[instrument(skip(connection))]
pub async fn get_role_by_name(
	connection: &mut DatabaseConnection,
	name: &str,
) -> Result<Option<i64>, sqlx::Error> {
	query(
		r#"
		SELECT
			id
		FROM
			role
		WHERE
			name = $1;
		"#,
	)
	.bind(name)
	.fetch_optional(&mut *connection)
	.await?
	.map(|row| row.try_get::<i64, &str>("id"))
	.transpose()
}

/// Loads every right a user holds, flattened across all of their roles.
/// This is what the authentication middleware turns into [`Grants`].
#[instrument(skip(connection))]
pub async fn get_rights_for_user(
	connection: &mut DatabaseConnection,
	user_id: i64,
) -> Result<Vec<Right>, sqlx::Error> {
	query(
		r#"
		SELECT DISTINCT
			access_right.resource,
			access_right.can_read,
			access_right.can_write,
			access_right.only_own
		FROM
			access_right
		JOIN
			role_right ON role_right.right_id = access_right.id
		JOIN
			user_role ON user_role.role_id = role_right.role_id
		WHERE
			user_role.user_id = $1;
		"#,
	)
	.bind(user_id)
	.fetch_all(&mut *connection)
	.await?
	.into_iter()
	.map(|row| {
		Ok(Right {
			resource: row.try_get::<ResourceKind, &str>("resource")?,
			can_read: row.try_get::<bool, &str>("can_read")?,
			can_write: row.try_get::<bool, &str>("can_write")?,
			only_own: row.try_get::<bool, &str>("only_own")?,
		})
	})
	.collect::<Result<Vec<_>, sqlx::Error>>()
}

/// Seeds the two bootstrap roles. `user` is the self service role every
/// account gets on sign up: a read right and a write right on users and on
/// advertisements, each scoped to the holder's own rows. `admin` holds one
/// read and write right per kind that applies to every row. Seeding a role
/// or right that already exists fails with the matching duplicate error.
#[instrument(skip(connection))]
pub async fn seed_bootstrap_roles(connection: &mut DatabaseConnection) -> Result<(), ErrorType> {
	info!("Seeding bootstrap roles");

	let user_role = create_role(connection, constants::DEFAULT_ROLE)
		.await
		.map_err(to_duplicate_role)?;
	for kind in [ResourceKind::User, ResourceKind::Advertisement] {
		for can_read in [true, false] {
			let right = create_right(connection, kind, can_read, !can_read, true)
				.await
				.map_err(to_duplicate_right)?;
			assign_right_to_role(connection, user_role, right).await?;
		}
	}

	let admin_role = create_role(connection, constants::ADMIN_ROLE)
		.await
		.map_err(to_duplicate_role)?;
	for kind in [ResourceKind::User, ResourceKind::Advertisement] {
		let right = create_right(connection, kind, true, true, false)
			.await
			.map_err(to_duplicate_right)?;
		assign_right_to_role(connection, admin_role, right).await?;
	}

	Ok(())
}

fn to_duplicate_role(error: sqlx::Error) -> ErrorType {
	match error {
		sqlx::Error::Database(error) if error.is_unique_violation() => ErrorType::DuplicateRole,
		error => error.into(),
	}
}

fn to_duplicate_right(error: sqlx::Error) -> ErrorType {
	match error {
		sqlx::Error::Database(error) if error.is_unique_violation() => ErrorType::DuplicateRight,
		error => error.into(),
	}
}
