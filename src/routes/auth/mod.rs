use axum::{routing::post, Router};

use crate::prelude::*;

/// Sign in to an existing account.
mod login;
/// Create a new account.
mod sign_up;

pub use self::{login::*, sign_up::*};

/// Sets up the authentication routes. These are the only routes of the API
/// that do not require a token.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router {
	Router::new()
		.route("/sign-up", post(sign_up))
		.route("/sign-in", post(login))
		.with_state(state.clone())
}
