use time::{Duration, OffsetDateTime};

use super::rbac::{Grants, Resource, ResourceKind};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
	/// The id of the user.
	pub id: i64,
	/// The unique name the user signs in with.
	pub username: String,
	/// The argon2 PHC string of the user's password. The plain password is
	/// never stored anywhere.
	pub password: String,
	/// When the account was created.
	pub created: OffsetDateTime,
}

impl Resource for User {
	const KIND: ResourceKind = ResourceKind::User;

	/// Every account owns itself, which is what makes owner scoped rights
	/// on users mean "your own account".
	fn owner(&self) -> Option<i64> {
		Some(self.id)
	}
}

/// One bearer token, minted at sign in. Whether it has expired is decided
/// at validation time from the creation instant, nothing about expiry is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	/// The opaque token string handed to the client, a UUIDv4.
	pub token: String,
	/// The user this token authenticates.
	pub user_id: i64,
	/// When the token was minted.
	pub created: OffsetDateTime,
}

impl Token {
	/// Whether this token has outlived the given validity at the given
	/// instant. A token exactly as old as the validity is still good.
	pub fn is_expired(&self, validity: Duration, now: OffsetDateTime) -> bool {
		now - self.created > validity
	}
}

/// The authenticated identity of a request. The token middleware builds
/// this and puts it in the request extensions for handlers to take out.
#[derive(Debug, Clone)]
pub struct UserAuthenticationData {
	/// The id of the authenticated user.
	pub user_id: i64,
	/// The rights the user holds, ready for access decisions.
	pub grants: Grants,
}

#[cfg(test)]
mod tests {
	use time::{Duration, OffsetDateTime};

	use super::{Token, User};
	use crate::models::rbac::Resource;

	#[test]
	fn accounts_own_themselves() {
		let user = User {
			id: 7,
			username: "alice".to_string(),
			password: "not a real hash".to_string(),
			created: OffsetDateTime::UNIX_EPOCH,
		};

		assert_eq!(user.owner(), Some(7));
	}

	#[test]
	fn tokens_expire_strictly_after_their_validity() {
		let created = OffsetDateTime::UNIX_EPOCH;
		let token = Token {
			token: "test".to_string(),
			user_id: 1,
			created,
		};
		let validity = Duration::seconds(172_800);

		assert!(!token.is_expired(validity, created + validity - Duration::seconds(1)));
		// Exactly as old as the validity is still good
		assert!(!token.is_expired(validity, created + validity));
		assert!(token.is_expired(validity, created + validity + Duration::seconds(1)));
	}
}
