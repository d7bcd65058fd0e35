use std::str::FromStr;

use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::prelude::*;

/// Initializes the advertisement tables
#[instrument(skip(connection))]
pub async fn initialize_advertisement_tables(
	connection: &mut DatabaseConnection,
) -> Result<(), sqlx::Error> {
	info!("Setting up advertisement tables");

	// The price is stored as the canonical decimal string, sqlite has no
	// exact decimal type.
	query(
		r#"
		CREATE TABLE advertisement(
			id INTEGER PRIMARY KEY,
			title TEXT NOT NULL,
			description TEXT NOT NULL,
			price TEXT NOT NULL,
			author TEXT NOT NULL,
			created TEXT NOT NULL,
			user_id INTEGER NOT NULL,

			CHECK(LENGTH(TRIM(title)) > 0),
			CHECK(LENGTH(title) <= 50),
			CHECK(LENGTH(author) <= 100),

			FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE
		);
		"#,
	)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Inserts an advertisement and returns the id the database assigned to it.
/// The id on the value itself is ignored.
#[instrument(skip(connection, advertisement))]
pub async fn create_advertisement(
	connection: &mut DatabaseConnection,
	advertisement: &Advertisement,
) -> Result<i64, sqlx::Error> {
	let result = query(
		r#"
		INSERT INTO advertisement(
			title,
			description,
			price,
			author,
			created,
			user_id
		)
		VALUES
			($1, $2, $3, $4, $5, $6);
		"#,
	)
	.bind(&advertisement.title)
	.bind(&advertisement.description)
	.bind(advertisement.price.to_string())
	.bind(&advertisement.author)
	.bind(advertisement.created)
	.bind(advertisement.user_id)
	.execute(&mut *connection)
	.await?;

	Ok(result.last_insert_rowid())
}

/// Fetches an advertisement by its id.
#[instrument(skip(connection))]
pub async fn get_advertisement_by_id(
	connection: &mut DatabaseConnection,
	advertisement_id: i64,
) -> Result<Option<Advertisement>, sqlx::Error> {
	query(
		r#"
		SELECT
			id,
			title,
			description,
			price,
			author,
			created,
			user_id
		FROM
			advertisement
		WHERE
			id = $1;
		"#,
	)
	.bind(advertisement_id)
	.fetch_optional(&mut *connection)
	.await?
	.map(|row| {
		let price = row.try_get::<String, &str>("price")?;
		let price = Decimal::from_str(&price).map_err(|err| sqlx::Error::ColumnDecode {
			index: "price".to_string(),
			source: Box::new(err),
		})?;

		Ok(Advertisement {
			id: row.try_get::<i64, &str>("id")?,
			title: row.try_get::<String, &str>("title")?,
			description: row.try_get::<String, &str>("description")?,
			price,
			author: row.try_get::<String, &str>("author")?,
			created: row.try_get::<OffsetDateTime, &str>("created")?,
			user_id: row.try_get::<i64, &str>("user_id")?,
		})
	})
	.transpose()
}

/// Writes the mutable fields of an advertisement back to its row. The
/// creation time and the owner never change.
#[instrument(skip(connection, advertisement))]
pub async fn update_advertisement(
	connection: &mut DatabaseConnection,
	advertisement: &Advertisement,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		UPDATE
			advertisement
		SET
			title = $2,
			description = $3,
			price = $4,
			author = $5
		WHERE
			id = $1;
		"#,
	)
	.bind(advertisement.id)
	.bind(&advertisement.title)
	.bind(&advertisement.description)
	.bind(advertisement.price.to_string())
	.bind(&advertisement.author)
	.execute(&mut *connection)
	.await?;

	Ok(())
}

/// Deletes an advertisement.
#[instrument(skip(connection))]
pub async fn delete_advertisement(
	connection: &mut DatabaseConnection,
	advertisement_id: i64,
) -> Result<(), sqlx::Error> {
	query(
		r#"
		DELETE FROM
			advertisement
		WHERE
			id = $1;
		"#,
	)
	.bind(advertisement_id)
	.execute(&mut *connection)
	.await?;

	Ok(())
}
