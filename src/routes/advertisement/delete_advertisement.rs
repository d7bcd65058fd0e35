use axum::{
	extract::{Path, State},
	Extension,
	Json,
};

use crate::{db, prelude::*, routes::StatusResponse};

/// Takes a listing down. The caller needs a right to write the listing; the
/// default role only covers the caller's own, while admins can take down
/// anything.
#[instrument(skip(state, token_data))]
pub async fn delete_advertisement(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(advertisement_id): Path<i64>,
) -> Result<Json<StatusResponse>, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let advertisement = db::get_advertisement_by_id(&mut connection, advertisement_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data
		.grants
		.require(&AccessRequest::write_of(&advertisement))?;

	db::delete_advertisement(&mut connection, advertisement_id).await?;

	info!("Advertisement `{}` deleted", advertisement_id);

	Ok(Json(StatusResponse {
		status: "deleted".to_string(),
	}))
}
