use axum::http::StatusCode;
use serde_json::json;
use time::Duration;

use super::{
	api_request,
	body_json,
	create_test_token,
	create_test_user,
	init_tests,
	send_request,
};
use crate::prelude::*;

/// Creates an account with the given role and a fresh token for it.
async fn signed_in(
	state: &AppState,
	username: &str,
	role: &str,
) -> Result<(i64, String), ErrorType> {
	let user_id = create_test_user(state, username, "hunter2", role).await?;
	let token = create_test_token(state, user_id, Duration::ZERO).await?;

	Ok((user_id, token))
}

#[tokio::test]
async fn listing_lifecycle_respects_ownership_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let (alice, alice_token) = signed_in(&state, "alice", constants::DEFAULT_ROLE).await?;
	let (_bob, bob_token) = signed_in(&state, "bob", constants::DEFAULT_ROLE).await?;
	let (_admin, admin_token) = signed_in(&state, "admin", constants::ADMIN_ROLE).await?;

	// Alice posts a listing
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/advertisement",
			Some(&alice_token),
			Some(json!({
				"title": "Mountain bike",
				"description": "Barely used",
				"price": "300.50",
				"author": "alice",
			})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::CREATED);
	let advertisement_id = body_json(response).await?["id"].as_i64().unwrap();
	let uri = format!("/advertisement/{advertisement_id}");

	// Bob can neither see nor change it
	let response = send_request(&state, api_request("GET", &uri, Some(&bob_token), None)?).await?;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	assert_eq!(body_json(response).await?["error"], json!("accessDenied"));
	let response = send_request(
		&state,
		api_request(
			"PATCH",
			&uri,
			Some(&bob_token),
			Some(json!({"title": "Hijacked"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	// Alice updates her own listing
	let response = send_request(
		&state,
		api_request(
			"PATCH",
			&uri,
			Some(&alice_token),
			Some(json!({"title": "Mountain bike, price drop", "price": "250.00"})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await?;
	assert_eq!(body["title"], json!("Mountain bike, price drop"));
	assert_eq!(body["price"], json!("250.00"));
	assert_eq!(body["description"], json!("Barely used"));
	assert_eq!(body["userId"], json!(alice));

	// And reads it back
	let response =
		send_request(&state, api_request("GET", &uri, Some(&alice_token), None)?).await?;
	assert_eq!(response.status(), StatusCode::OK);

	// The admin sees it and takes it down without owning it
	let response =
		send_request(&state, api_request("GET", &uri, Some(&admin_token), None)?).await?;
	assert_eq!(response.status(), StatusCode::OK);
	let response =
		send_request(&state, api_request("DELETE", &uri, Some(&admin_token), None)?).await?;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await?["status"], json!("deleted"));

	// Gone for everyone now
	let response =
		send_request(&state, api_request("GET", &uri, Some(&alice_token), None)?).await?;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	Ok(())
}

#[tokio::test]
async fn invalid_listing_bodies_are_rejected_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let (_alice, token) = signed_in(&state, "alice", constants::DEFAULT_ROLE).await?;

	// A title longer than 50 characters
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/advertisement",
			Some(&token),
			Some(json!({
				"title": "x".repeat(51),
				"description": "Too long",
				"price": "1.00",
				"author": "alice",
			})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await?["error"], json!("wrongParameters"));

	// A negative price
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/advertisement",
			Some(&token),
			Some(json!({
				"title": "Free money",
				"description": "Suspicious",
				"price": "-5.00",
				"author": "alice",
			})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	// An update that changes nothing
	let response = send_request(
		&state,
		api_request(
			"POST",
			"/advertisement",
			Some(&token),
			Some(json!({
				"title": "Lawnmower",
				"description": "Starts on the second pull",
				"price": "40.00",
				"author": "alice",
			})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::CREATED);
	let advertisement_id = body_json(response).await?["id"].as_i64().unwrap();

	let response = send_request(
		&state,
		api_request(
			"PATCH",
			&format!("/advertisement/{advertisement_id}"),
			Some(&token),
			Some(json!({})),
		)?,
	)
	.await?;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await?["error"], json!("wrongParameters"));

	Ok(())
}
