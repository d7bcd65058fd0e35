use axum::{middleware, routing::get, Router};

use super::token_authenticator;
use crate::prelude::*;

/// Delete a user account.
mod delete_user;
/// Fetch the public info of a user account.
mod get_user_info;
/// Change the username or password of a user account.
mod update_user;

pub use self::{delete_user::*, get_user_info::*, update_user::*};

/// Sets up the user routes. Every one of them requires a valid token, and
/// the engine decides per row what the caller may touch.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router {
	Router::new()
		.route(
			"/:user_id",
			get(get_user_info).patch(update_user).delete(delete_user),
		)
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			token_authenticator,
		))
		.with_state(state.clone())
}
