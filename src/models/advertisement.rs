use rust_decimal::Decimal;
use time::OffsetDateTime;

use super::rbac::{Resource, ResourceKind};

/// A classified listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
	/// The id of the advertisement.
	pub id: i64,
	/// The short title of the listing, at most 50 characters.
	pub title: String,
	/// The full listing text.
	pub description: String,
	/// The asking price. Kept as an exact decimal, never a binary float.
	pub price: Decimal,
	/// The display name of the author, at most 100 characters.
	pub author: String,
	/// When the listing was created.
	pub created: OffsetDateTime,
	/// The user that posted the listing.
	pub user_id: i64,
}

impl Resource for Advertisement {
	const KIND: ResourceKind = ResourceKind::Advertisement;

	fn owner(&self) -> Option<i64> {
		Some(self.user_id)
	}
}
