use rust_decimal::Decimal;
use time::OffsetDateTime;

use super::{create_test_user, init_tests};
use crate::{db, prelude::*};

/// Loads the grants of a user the same way the middleware does.
async fn grants_of(state: &AppState, user_id: i64) -> Result<Grants, ErrorType> {
	let mut connection = state.database.acquire().await?;
	let rights = db::get_rights_for_user(&mut connection, user_id).await?;

	Ok(Grants::new(user_id, rights))
}

fn advertisement_of(user_id: i64) -> Advertisement {
	Advertisement {
		id: 1,
		title: "Old bike".to_string(),
		description: "Runs fine".to_string(),
		price: Decimal::new(4999, 2),
		author: "someone".to_string(),
		created: OffsetDateTime::UNIX_EPOCH,
		user_id,
	}
}

#[tokio::test]
async fn seeded_user_role_is_scoped_to_own_rows_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let alice = create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;
	let bob = create_test_user(&state, "bob", "hunter2", constants::DEFAULT_ROLE).await?;

	let grants = grants_of(&state, alice).await?;

	// Own rows
	assert!(grants.evaluate(&AccessRequest::read_of(&advertisement_of(alice))));
	assert!(grants.evaluate(&AccessRequest::write_of(&advertisement_of(alice))));
	// Someone else's rows
	assert!(!grants.evaluate(&AccessRequest::read_of(&advertisement_of(bob))));
	assert!(!grants.evaluate(&AccessRequest::write_of(&advertisement_of(bob))));

	let mut connection = state.database.acquire().await?;
	let own_account = db::get_user_by_id(&mut connection, alice).await?.unwrap();
	assert!(grants.evaluate(&AccessRequest::read_of(&own_account)));
	assert!(grants.evaluate(&AccessRequest::write_of(&own_account)));

	// The default role holds split read and write rights, so no single
	// right covers a request for both operations at once
	assert!(!grants.evaluate(&AccessRequest::read_write_of(&own_account)));

	Ok(())
}

#[tokio::test]
async fn seeded_admin_role_ignores_ownership_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let alice = create_test_user(&state, "alice", "hunter2", constants::DEFAULT_ROLE).await?;
	let admin = create_test_user(&state, "admin", "hunter2", constants::ADMIN_ROLE).await?;

	let grants = grants_of(&state, admin).await?;

	assert!(grants.evaluate(&AccessRequest::read_of(&advertisement_of(alice))));
	assert!(grants.evaluate(&AccessRequest::write_of(&advertisement_of(alice))));
	// Admin rights carry both operations on one row, so a combined request
	// is satisfied as well
	assert!(grants.evaluate(&AccessRequest::read_write_of(&advertisement_of(alice))));

	// No seeded role holds rights on the right and role kinds
	assert!(!grants.evaluate(&AccessRequest {
		resource: ResourceKind::Right,
		owner: None,
		read: true,
		write: false,
	}));

	Ok(())
}

#[tokio::test]
async fn reseeding_conflicts_with_the_existing_rows_test() -> Result<(), ErrorType> {
	let state = init_tests().await?;
	let mut connection = state.database.acquire().await?;

	// The role name collides first
	let error = db::seed_bootstrap_roles(&mut connection).await.unwrap_err();
	assert_eq!(error, ErrorType::DuplicateRole);

	// Creating an already seeded right tuple directly collides on the
	// unique index of the rights table
	let error = db::create_right(&mut connection, ResourceKind::User, true, false, true)
		.await
		.unwrap_err();
	assert!(matches!(
		&error,
		sqlx::Error::Database(err) if err.is_unique_violation()
	));

	Ok(())
}
