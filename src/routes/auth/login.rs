use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{db, prelude::*, utils};

/// The body of a sign in request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	/// The username of the account.
	pub username: String,
	/// The password of the account.
	pub password: String,
}

/// The response to a successful sign in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	/// The bearer token to authenticate further requests with.
	pub token: String,
}

/// Verifies the credentials and mints a fresh bearer token. An unknown
/// username and a wrong password produce the exact same error, so the
/// response never reveals whether an account exists. Earlier tokens stay
/// valid until they age out.
#[instrument(skip(state, body))]
pub async fn login(
	State(state): State<AppState>,
	Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ErrorType> {
	let LoginRequest { username, password } = body;

	let mut connection = state.database.acquire().await?;

	let Some(user) = db::get_user_by_username(&mut connection, &username).await? else {
		info!("Sign in attempt for an unknown username");
		return Err(ErrorType::InvalidCredentials);
	};

	if !utils::validate_password(&password, &user.password)? {
		info!("Sign in attempt with a wrong password");
		return Err(ErrorType::InvalidCredentials);
	}

	let token = db::create_token(
		&mut connection,
		user.id,
		&Uuid::new_v4().to_string(),
		OffsetDateTime::now_utc(),
	)
	.await?;

	info!("User `{}` signed in", user.username);

	Ok(Json(LoginResponse { token: token.token }))
}
