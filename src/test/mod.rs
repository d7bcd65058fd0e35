use axum::{
	body::Body,
	http::{header, Request},
	response::Response,
};
use http_body_util::BodyExt;
use sqlx::pool::PoolOptions;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{db, prelude::*, routes, utils};

mod advertisement;
mod auth;
mod rbac;

/// Builds an [`AppState`] over a fresh in-memory database with every table
/// created and the bootstrap roles seeded.
async fn init_tests() -> Result<AppState, ErrorType> {
	let config = AppConfig {
		bind_address: "127.0.0.1:0".parse()?,
		environment: RunningEnvironment::Development,
		database: DatabaseConfig {
			file: ":memory:".to_string(),
			connection_limit: 1,
		},
		api: ApiConfig { token_ttl: 172_800 },
	};

	// A second connection to `:memory:` would open a second, empty
	// database, so the pool is capped at a single connection
	let database = PoolOptions::<DatabaseType>::new()
		.max_connections(1)
		.connect_with(
			<DatabaseConnection as sqlx::Connection>::Options::new()
				.filename(&config.database.file)
				.foreign_keys(true),
		)
		.await?;

	let state = AppState { database, config };

	db::initialize(&state).await?;

	Ok(state)
}

/// Creates an account with the given role straight through the database
/// layer and returns its id.
async fn create_test_user(
	state: &AppState,
	username: &str,
	password: &str,
	role: &str,
) -> Result<i64, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let user_id = db::create_user(
		&mut connection,
		username,
		&utils::hash_password(password)?,
		OffsetDateTime::now_utc(),
	)
	.await?;
	let role_id = db::get_role_by_name(&mut connection, role)
		.await?
		.ok_or_else(|| ErrorType::server_error("role is missing"))?;
	db::assign_role_to_user(&mut connection, user_id, role_id).await?;

	Ok(user_id)
}

/// Mints a token for the user, back-dated by the given age.
async fn create_test_token(
	state: &AppState,
	user_id: i64,
	age: Duration,
) -> Result<String, ErrorType> {
	let mut connection = state.database.acquire().await?;

	let token = db::create_token(
		&mut connection,
		user_id,
		&Uuid::new_v4().to_string(),
		OffsetDateTime::now_utc() - age,
	)
	.await?;

	Ok(token.token)
}

/// Builds a JSON request for the API, optionally authenticated.
fn api_request(
	method: &str,
	uri: &str,
	token: Option<&str>,
	body: Option<serde_json::Value>,
) -> Result<Request<Body>, ErrorType> {
	let mut builder = Request::builder()
		.method(method)
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json");
	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
	}

	Ok(match body {
		Some(body) => builder.body(Body::from(serde_json::to_vec(&body)?))?,
		None => builder.body(Body::empty())?,
	})
}

/// Sends one request through the full router.
async fn send_request(state: &AppState, request: Request<Body>) -> Result<Response, ErrorType> {
	Ok(routes::setup_routes(state).oneshot(request).await?)
}

/// Reads a response body back as loosely typed JSON.
async fn body_json(response: Response) -> Result<serde_json::Value, ErrorType> {
	let bytes = response.into_body().collect().await?.to_bytes();

	Ok(serde_json::from_slice(&bytes)?)
}
