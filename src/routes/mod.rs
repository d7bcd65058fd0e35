use axum::Router;
use serde::Serialize;

use crate::prelude::*;

/// The advertisement endpoints.
mod advertisement;
/// Sign up and sign in.
mod auth;
/// The middlewares used by the routes, currently only the token
/// authenticator.
mod middlewares;
/// The user account endpoints.
mod user;

pub use self::middlewares::token_authenticator;

/// The confirmation body returned by endpoints that have nothing more
/// specific to say, like deletions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
	/// What happened to the resource.
	pub status: String,
}

/// Sets up all the routes of the API.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router {
	Router::new()
		.nest("/auth", auth::setup_routes(state))
		.nest("/user", user::setup_routes(state))
		.nest("/advertisement", advertisement::setup_routes(state))
}
