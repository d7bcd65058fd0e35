use axum::{
	extract::{Path, State},
	Extension,
	Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{db, prelude::*, utils};

/// The body of a user update request. Fields that are absent stay
/// unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	/// The new username, when changing it.
	pub username: Option<String>,
	/// The new password, when changing it.
	pub password: Option<String>,
}

/// The updated view of the account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
	/// The id of the user.
	pub id: i64,
	/// The username after the update.
	pub username: String,
	/// When the account was created.
	pub created: OffsetDateTime,
}

/// Changes the username or password of a user. The caller needs a right to
/// write the user; the default role only allows that on the caller's own
/// account. Tokens minted before a password change stay valid.
#[instrument(skip(state, token_data, body))]
pub async fn update_user(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(user_id): Path<i64>,
	Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, ErrorType> {
	let UpdateUserRequest { username, password } = body;

	if username.is_none() && password.is_none() {
		return Err(ErrorType::WrongParameters);
	}

	let mut transaction = state.database.begin().await?;

	let user = db::get_user_by_id(&mut transaction, user_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data.grants.require(&AccessRequest::write_of(&user))?;

	let username = match username {
		Some(username) => {
			let username = username.trim().to_string();
			if username.is_empty() || username.len() > 50 {
				return Err(ErrorType::WrongParameters);
			}
			username
		}
		None => user.username,
	};
	let password = match password {
		Some(password) if password.is_empty() => return Err(ErrorType::WrongParameters),
		Some(password) => utils::hash_password(&password)?,
		None => user.password,
	};

	db::update_user(&mut transaction, user_id, &username, &password)
		.await
		.map_err(|error| match error {
			sqlx::Error::Database(error) if error.is_unique_violation() => {
				ErrorType::UsernameTaken
			}
			error => error.into(),
		})?;

	transaction.commit().await?;

	info!("User `{}` updated", user_id);

	Ok(Json(UpdateUserResponse {
		id: user_id,
		username,
		created: user.created,
	}))
}
