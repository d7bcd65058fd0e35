use std::str::FromStr;

use strum::{Display, EnumString};

use super::error::ErrorType;

/// The kinds of resources that rights can be granted on. The [`Display`]
/// and [`FromStr`] forms of a kind are the exact tags stored in the
/// `access_right` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
	/// A user account.
	User,
	/// A classified listing.
	Advertisement,
	/// A right row itself.
	Right,
	/// A role row itself.
	Role,
}

impl<DB> sqlx::Type<DB> for ResourceKind
where
	DB: sqlx::Database,
	String: sqlx::Type<DB>,
{
	fn type_info() -> <DB as sqlx::Database>::TypeInfo {
		<String as sqlx::Type<DB>>::type_info()
	}

	fn compatible(ty: &<DB as sqlx::Database>::TypeInfo) -> bool {
		<String as sqlx::Type<DB>>::compatible(ty)
	}
}

impl<'q, DB> sqlx::Encode<'q, DB> for ResourceKind
where
	DB: sqlx::Database,
	String: sqlx::Encode<'q, DB>,
{
	fn encode_by_ref(
		&self,
		buf: &mut <DB as sqlx::Database>::ArgumentBuffer<'q>,
	) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
		<String as sqlx::Encode<'q, DB>>::encode(self.to_string(), buf)
	}
}

impl<'q, DB> sqlx::Decode<'q, DB> for ResourceKind
where
	DB: sqlx::Database,
	String: sqlx::Decode<'q, DB>,
{
	fn decode(
		value: <DB as sqlx::Database>::ValueRef<'q>,
	) -> Result<Self, sqlx::error::BoxDynError> {
		let kind = <String as sqlx::Decode<'q, DB>>::decode(value)?;
		Ok(FromStr::from_str(&kind)?)
	}
}

/// An entity that the access decision engine can make decisions about.
/// Implementing this declares which kind tag rights on the entity carry and
/// which user, if any, owns a given row of it.
pub trait Resource {
	/// The kind tag that rights on this entity are stored under.
	const KIND: ResourceKind;

	/// The user that owns this row. Kinds that are not owned by anyone
	/// (rights and roles themselves) return `None`, and can then only be
	/// reached through rights that are not owner scoped.
	fn owner(&self) -> Option<i64>;
}

/// One granted right: a resource kind, the operations it allows, and
/// whether it only applies to rows owned by the holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Right {
	/// The kind of resource this right applies to.
	pub resource: ResourceKind,
	/// Whether this right allows reading.
	pub can_read: bool,
	/// Whether this right allows creating, updating and deleting.
	pub can_write: bool,
	/// When `true`, the right only applies to rows owned by the user that
	/// holds it.
	pub only_own: bool,
}

/// Everything the engine needs to know about one attempted access: what
/// kind of row, who owns it, and which operations the caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
	/// The kind of resource being accessed.
	pub resource: ResourceKind,
	/// The user that owns the row, if the kind has an owner at all.
	pub owner: Option<i64>,
	/// Whether the action needs to read the row.
	pub read: bool,
	/// Whether the action needs to write the row.
	pub write: bool,
}

impl AccessRequest {
	/// A request to read the given resource.
	pub fn read_of<R>(resource: &R) -> Self
	where
		R: Resource,
	{
		Self {
			resource: R::KIND,
			owner: resource.owner(),
			read: true,
			write: false,
		}
	}

	/// A request to write (create, update or delete) the given resource.
	pub fn write_of<R>(resource: &R) -> Self
	where
		R: Resource,
	{
		Self {
			resource: R::KIND,
			owner: resource.owner(),
			read: false,
			write: true,
		}
	}

	/// A request to both read and write the given resource. Only satisfied
	/// by a single right that allows both operations.
	pub fn read_write_of<R>(resource: &R) -> Self
	where
		R: Resource,
	{
		Self {
			resource: R::KIND,
			owner: resource.owner(),
			read: true,
			write: true,
		}
	}
}

/// The full set of rights a user holds, flattened across all of their
/// roles. This is built once per request by the authentication middleware
/// and dropped when the request ends, so revoking a role takes effect from
/// the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grants {
	user_id: i64,
	rights: Vec<Right>,
}

impl Grants {
	/// Creates the grants of the given user from their loaded rights.
	pub fn new(user_id: i64, rights: Vec<Right>) -> Self {
		Self { user_id, rights }
	}

	/// Decides whether the requested access is allowed. A single right must
	/// satisfy the whole request: it has to be for the requested kind, allow
	/// every requested operation, and, if it is owner scoped, the row has to
	/// be owned by the holder. A request that asks for neither read nor
	/// write is always denied.
	pub fn evaluate(&self, request: &AccessRequest) -> bool {
		if !request.read && !request.write {
			return false;
		}
		self.rights.iter().any(|right| {
			right.resource == request.resource
				&& (!request.read || right.can_read)
				&& (!request.write || right.can_write)
				&& (!right.only_own || request.owner == Some(self.user_id))
		})
	}

	/// Like [`Self::evaluate`], but turns a denial into
	/// [`ErrorType::AccessDenied`] so that handlers can use `?`.
	pub fn require(&self, request: &AccessRequest) -> Result<(), ErrorType> {
		if self.evaluate(request) {
			Ok(())
		} else {
			Err(ErrorType::AccessDenied)
		}
	}
}
