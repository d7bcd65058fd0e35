use axum::{
	extract::{Path, State},
	Extension,
	Json,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// The public view of a user account. The password hash is never part of
/// any response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserInfoResponse {
	/// The id of the user.
	pub id: i64,
	/// The unique name of the user.
	pub username: String,
	/// When the account was created.
	pub created: OffsetDateTime,
}

/// Returns the basic info of a user. The caller needs a right to read the
/// user; with the default role that means their own account only.
#[instrument(skip(state, token_data))]
pub async fn get_user_info(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(user_id): Path<i64>,
) -> Result<Json<GetUserInfoResponse>, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let user = db::get_user_by_id(&mut connection, user_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data.grants.require(&AccessRequest::read_of(&user))?;

	Ok(Json(GetUserInfoResponse {
		id: user.id,
		username: user.username,
		created: user.created,
	}))
}
