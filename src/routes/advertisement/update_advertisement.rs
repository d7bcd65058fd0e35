use axum::{
	extract::{Path, State},
	Extension,
	Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::GetAdvertisementResponse;
use crate::{db, prelude::*};

/// The body of a listing update. Fields that are absent stay unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdvertisementRequest {
	/// The new title, when changing it.
	pub title: Option<String>,
	/// The new listing text, when changing it.
	pub description: Option<String>,
	/// The new asking price, when changing it.
	pub price: Option<Decimal>,
	/// The new author display name, when changing it.
	pub author: Option<String>,
}

/// Changes the provided fields of a listing and returns the full updated
/// view. The caller needs a right to write the listing; the default role
/// only covers the caller's own.
#[instrument(skip(state, token_data, body))]
pub async fn update_advertisement(
	State(state): State<AppState>,
	Extension(token_data): Extension<UserAuthenticationData>,
	Path(advertisement_id): Path<i64>,
	Json(body): Json<UpdateAdvertisementRequest>,
) -> Result<Json<GetAdvertisementResponse>, ErrorType> {
	let UpdateAdvertisementRequest {
		title,
		description,
		price,
		author,
	} = body;

	if title.is_none() && description.is_none() && price.is_none() && author.is_none() {
		return Err(ErrorType::WrongParameters);
	}

	let mut transaction = state.database.begin().await?;

	let mut advertisement = db::get_advertisement_by_id(&mut transaction, advertisement_id)
		.await?
		.ok_or(ErrorType::ResourceDoesNotExist)?;

	token_data
		.grants
		.require(&AccessRequest::write_of(&advertisement))?;

	if let Some(title) = title {
		if title.trim().is_empty() || title.len() > 50 {
			return Err(ErrorType::WrongParameters);
		}
		advertisement.title = title;
	}
	if let Some(description) = description {
		advertisement.description = description;
	}
	if let Some(price) = price {
		if price.is_sign_negative() {
			return Err(ErrorType::WrongParameters);
		}
		advertisement.price = price;
	}
	if let Some(author) = author {
		if author.len() > 100 {
			return Err(ErrorType::WrongParameters);
		}
		advertisement.author = author;
	}

	db::update_advertisement(&mut transaction, &advertisement).await?;

	transaction.commit().await?;

	info!("Advertisement `{}` updated", advertisement_id);

	Ok(Json(advertisement.into()))
}
