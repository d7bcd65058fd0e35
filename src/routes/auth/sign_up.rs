use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{db, prelude::*, utils};

/// The body of a sign up request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
	/// The username of the new account. At most 50 characters, unique
	/// across all accounts.
	pub username: String,
	/// The password of the new account.
	pub password: String,
}

/// The response to a successful sign up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
	/// The id of the freshly created user.
	pub id: i64,
}

/// Creates an account and assigns it the default role, all in one
/// transaction. The new user can sign in right away, no token is minted
/// here.
#[instrument(skip(state, body))]
pub async fn sign_up(
	State(state): State<AppState>,
	Json(body): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ErrorType> {
	let SignUpRequest { username, password } = body;

	let username = username.trim().to_string();
	if username.is_empty() || username.len() > 50 || password.is_empty() {
		return Err(ErrorType::WrongParameters);
	}

	let password = utils::hash_password(&password)?;

	let mut transaction = state.database.begin().await?;

	let user_id = db::create_user(
		&mut transaction,
		&username,
		&password,
		OffsetDateTime::now_utc(),
	)
	.await
	.map_err(|error| match error {
		sqlx::Error::Database(error) if error.is_unique_violation() => ErrorType::UsernameTaken,
		error => error.into(),
	})?;

	let role_id = db::get_role_by_name(&mut transaction, constants::DEFAULT_ROLE)
		.await?
		.ok_or_else(|| ErrorType::server_error("the default role is missing"))?;

	db::assign_role_to_user(&mut transaction, user_id, role_id).await?;

	transaction.commit().await?;

	info!("User `{}` signed up", username);

	Ok((StatusCode::CREATED, Json(SignUpResponse { id: user_id })))
}
