use axum::http::StatusCode;
use serde_json::json;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{
	api_request,
	body_json,
	create_test_token,
	create_test_user,
	init_tests,
	send_request,
};
use crate::{db, models::error::ApiErrorResponseBody, prelude::*};

#[tokio::test]
async fn sign_up_and_sign_in_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;

	// Create the account
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-up",
			None,
			Some(json!({"username": "alice", "password": "hunter2"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::CREATED);
	let user_id = body_json(response).await?["id"].as_i64().unwrap();

	// Sign in and check the minted token
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-in",
			None,
			Some(json!({"username": "alice", "password": "hunter2"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::OK);
	let token = body_json(response).await?["token"]
		.as_str()
		.unwrap()
		.to_string();
	assert!(Uuid::parse_str(&token).is_ok());

	let mut connection = state.database.acquire().await?;
	let stored = db::get_token(&mut connection, &token).await?.unwrap();
	assert_eq!(stored.user_id, user_id);
	assert!(OffsetDateTime::now_utc() - stored.created < Duration::seconds(5));

	Ok(())
}

#[tokio::test]
async fn sign_up_with_a_taken_username_conflicts_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;

	let response = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-up",
			None,
			Some(json!({"username": "alice", "password": "different"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::CONFLICT);
	let body = body_json(response).await?;
	assert_eq!(body["success"], json!(false));
	assert_eq!(body["error"], json!("usernameTaken"));

	Ok(())
}

#[tokio::test]
async fn sign_up_rejects_blank_usernames_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;

	let response = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-up",
			None,
			Some(json!({"username": "   ", "password": "hunter2"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await?["error"], json!("wrongParameters"));

	Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;

	let wrong_password = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-in",
			None,
			Some(json!({"username": "alice", "password": "wrong"})),
		)?,
	)
	.await?;
	let unknown_user = send_request(
		&state,
		api_request(
			"POST",
			"/auth/sign-in",
			None,
			Some(json!({"username": "nobody", "password": "wrong"})),
		)?,
	)
	.await?;

	assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(
		body_json(wrong_password).await?,
		body_json(unknown_user).await?
	);

	Ok(())
}

#[tokio::test]
async fn token_expiry_boundary_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let user_id = create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;
	let ttl = state.config.api.token_validity();

	// One second inside the validity window
	let fresh = create_test_token(&state, user_id, ttl - Duration::seconds(1)).await?;
	let response = send_request(
		&state,
		api_request("GET", &format!("/user/{user_id}"), Some(&fresh), None)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::OK);

	// One second past it
	let stale = create_test_token(&state, user_id, ttl + Duration::seconds(1)).await?;
	let response = send_request(
		&state,
		api_request("GET", &format!("/user/{user_id}"), Some(&stale), None)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	let expired_body = body_json(response).await?;
	assert_eq!(expired_body["error"], json!("authenticationTokenInvalid"));

	// A token that was never minted produces the exact same response
	let response = send_request(
		&state,
		api_request(
			"GET",
			&format!("/user/{user_id}"),
			Some(&Uuid::new_v4().to_string()),
			None,
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(body_json(response).await?, expired_body);

	Ok(())
}

#[tokio::test]
async fn malformed_and_missing_tokens_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let user_id = create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;

	// Not shaped like a token at all
	let response = send_request(
		&state,
		api_request("GET", &format!("/user/{user_id}"), Some("not-a-token"), None)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let body = serde_json::from_value::<ApiErrorResponseBody>(body_json(response).await?)?;
	assert_eq!(body.error, ErrorType::MalformedBearerToken);
	assert!(!body.success);

	// No Authorization header at all
	let response = send_request(
		&state,
		api_request("GET", &format!("/user/{user_id}"), None, None)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(
		body_json(response).await?["error"],
		json!("authenticationTokenInvalid")
	);

	Ok(())
}
