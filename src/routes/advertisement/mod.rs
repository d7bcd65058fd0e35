use axum::{
	middleware,
	routing::{get, post},
	Router,
};

use super::token_authenticator;
use crate::prelude::*;

/// Post a new listing.
mod create_advertisement;
/// Take a listing down.
mod delete_advertisement;
/// Fetch one listing.
mod get_advertisement;
/// Change the fields of a listing.
mod update_advertisement;

pub use self::{
	create_advertisement::*,
	delete_advertisement::*,
	get_advertisement::*,
	update_advertisement::*,
};

/// Sets up the advertisement routes. Every one of them requires a valid
/// token, and the engine decides per row what the caller may touch.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router {
	Router::new()
		.route("/", post(create_advertisement))
		.route(
			"/:advertisement_id",
			get(get_advertisement)
				.patch(update_advertisement)
				.delete(delete_advertisement),
		)
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			token_authenticator,
		))
		.with_state(state.clone())
}
