use axum::{
	extract::{Path, State},
	Extension,
	Json,
};

use crate::{db, prelude::*, routes::StatusResponse};

/// Deletes a user account. The caller needs a right to write the user; the
/// default role only allows deleting the caller's own account. The user's
/// tokens and advertisements are removed with it.
#[instrument(skip(state, token_data))]
pub async fn delete_user(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(user_id): Path<i64>,
) -> Result<Json<StatusResponse>, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let user = db::get_user_by_id(&mut connection, user_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data.grants.require(&AccessRequest::write_of(&user))?;

	db::delete_user(&mut connection, user_id).await?;

	info!("User `{}` deleted", user.username);

	Ok(Json(StatusResponse {
		status: "deleted".to_string(),
	}))
}
