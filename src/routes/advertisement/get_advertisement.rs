use axum::{
	extract::{Path, State},
	Extension,
	Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// The full view of one listing. Also returned by the update endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAdvertisementResponse {
	/// The id of the advertisement.
	pub id: i64,
	/// The short title of the listing.
	pub title: String,
	/// The full listing text.
	pub description: String,
	/// The asking price, serialized as a decimal string.
	pub price: Decimal,
	/// The display name of the author.
	pub author: String,
	/// When the listing was created.
	pub created: OffsetDateTime,
	/// The user that owns the listing.
	pub user_id: i64,
}

impl From<Advertisement> for GetAdvertisementResponse {
	fn from(advertisement: Advertisement) -> Self {
		Self {
			id: advertisement.id,
			title: advertisement.title,
			description: advertisement.description,
			price: advertisement.price,
			author: advertisement.author,
			created: advertisement.created,
			user_id: advertisement.user_id,
		}
	}
}

/// Returns one listing. The caller needs a right to read it; the default
/// role only covers the caller's own listings.
#[instrument(skip(state, token_data))]
pub async fn get_advertisement(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(advertisement_id): Path<i64>,
) -> Result<Json<GetAdvertisementResponse>, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let advertisement = db::get_advertisement_by_id(&mut connection, advertisement_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data
		.grants
		.require(&AccessRequest::read_of(&advertisement))?;

	Ok(Json(advertisement.into()))
}
