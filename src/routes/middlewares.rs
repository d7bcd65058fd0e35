use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::Response,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{db, prelude::*};

/// Authenticates a request from its `Authorization` bearer header and puts
/// a [`UserAuthenticationData`] into the request extensions for the handler
/// to take out. A missing, unknown and expired token all produce the exact
/// same error, so a caller cannot tell which of the checks failed.
#[instrument(skip(state, request, next))]
pub async fn token_authenticator(
	State(state): State<AppState>,
	mut request: Request,
	next: Next,
) -> Result<Response, ErrorType> {
	trace!("Authenticating request");

	let Some(header) = request
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
	else {
		info!("No authentication token provided");
		return Err(ErrorType::AuthenticationTokenInvalid);
	};

	let Some(token) = header.strip_prefix("Bearer ") else {
		warn!("Authorization header is not a bearer token");
		return Err(ErrorType::MalformedBearerToken);
	};

	// Tokens are UUIDs. Anything else is rejected before touching the
	// database.
	if Uuid::parse_str(token).is_err() {
		warn!("Authentication token is not shaped like a token");
		return Err(ErrorType::MalformedBearerToken);
	}

	let mut connection = state.database.acquire().await?;

	let Some(token) = db::get_token(&mut connection, token).await? else {
		warn!("Unknown authentication token provided");
		return Err(ErrorType::AuthenticationTokenInvalid);
	};

	if token.is_expired(state.config.api.token_validity(), OffsetDateTime::now_utc()) {
		info!("Authentication token has expired");
		return Err(ErrorType::AuthenticationTokenInvalid);
	}

	trace!("Authentication token is valid");

	let rights = db::get_rights_for_user(&mut connection, token.user_id).await?;

	// The handler checks out its own connection, give this one back early
	drop(connection);

	request.extensions_mut().insert(UserAuthenticationData {
		user_id: token.user_id,
		grants: Grants::new(token.user_id, rights),
	});

	Ok(next.run(request).await)
}
