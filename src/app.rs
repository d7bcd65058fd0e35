use crate::prelude::*;

/// The global state of the application. This will contain the database pool
/// and the config used to start the application. A clone of this is passed
/// to every route handler through axum's state.
#[derive(Clone)]
pub struct AppState {
	/// The sqlite database connection pool.
	pub database: sqlx::Pool<DatabaseType>,
	/// The config the application was started with.
	pub config: AppConfig,
}
