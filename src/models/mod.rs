/// The advertisement entity.
pub mod advertisement;
/// The error type returned by every fallible path of the API, and the JSON
/// envelope it is sent to clients in.
pub mod error;
/// The access decision engine: resource kinds, rights and the grants that
/// decide every row level access.
pub mod rbac;
/// User accounts, bearer tokens and the authenticated request identity.
pub mod user;
