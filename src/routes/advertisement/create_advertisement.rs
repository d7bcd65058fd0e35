use axum::{extract::State, http::StatusCode, Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{db, prelude::*};

/// The body of a request to post a listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdvertisementRequest {
	/// The short title of the listing, at most 50 characters.
	pub title: String,
	/// The full listing text.
	pub description: String,
	/// The asking price, an exact decimal.
	pub price: Decimal,
	/// The display name of the author, at most 100 characters.
	pub author: String,
}

/// The response to a successfully posted listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdvertisementResponse {
	/// The id of the freshly created advertisement.
	pub id: i64,
}

/// Posts a listing owned by the caller. The access decision is made on the
/// instance about to be inserted, so the engine sees the same owner the row
/// will have.
#[instrument(skip(state, token_data, body))]
pub async fn create_advertisement(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Json(body): Json<CreateAdvertisementRequest>,
) -> Result<(StatusCode, Json<CreateAdvertisementResponse>), ErrorType> {
	let CreateAdvertisementRequest {
		title,
		description,
		price,
		author,
	} = body;

	if title.trim().is_empty()
		|| title.len() > 50
		|| author.len() > 100
		|| price.is_sign_negative()
	{
		return Err(ErrorType::WrongParameters);
	}

	let advertisement = Advertisement {
		// The real id is assigned by the database on insert
		id: 0,
		title,
		description,
		price,
		author,
		created: OffsetDateTime::now_utc(),
		user_id: token_data.user_id,
	};

	token_data
		.grants
		.require(&AccessRequest::write_of(&advertisement))?;

	let mut connection = state.database.acquire().await?;

	let advertisement_id = db::create_advertisement(&mut connection, &advertisement).await?;

	info!("Advertisement `{}` created", advertisement_id);

	Ok((
		StatusCode::CREATED,
		Json(CreateAdvertisementResponse {
			id: advertisement_id,
		}),
	))
}
