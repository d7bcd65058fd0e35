//! A small classifieds board API. Users sign up, sign in and manage
//! advertisements over HTTP, and every data access is decided row by row
//! by a role based access control engine.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{level_filters::LevelFilter, Dispatch, Level};
use tracing_subscriber::{
	fmt::{format::FmtSpan, Layer as FmtLayer},
	layer::SubscriberExt,
	Layer,
};

use crate::prelude::*;

/// The state of the application, holding the database pool and the config.
mod app;
/// All database functions: connecting, creating tables and queries.
mod db;
/// The models used by the application, including the access control engine.
mod models;
/// The prelude, re-exporting the most commonly used items.
mod prelude;
/// All routes of the API, along with the authentication middleware.
mod routes;
/// Utilities: configuration, constants and password hashing.
mod utils;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() {
	let config = AppConfig::parse().expect("Failed to parse configuration");

	tracing::dispatcher::set_global_default(Dispatch::new(
		tracing_subscriber::registry().with(
			FmtLayer::new()
				.with_span_events(FmtSpan::NONE)
				.event_format(
					tracing_subscriber::fmt::format()
						.with_ansi(true)
						.with_file(false)
						.without_time()
						.compact(),
				)
				.with_filter(
					tracing_subscriber::filter::Targets::new()
						.with_target(env!("CARGO_PKG_NAME"), LevelFilter::TRACE),
				)
				.with_filter(LevelFilter::from_level(
					if config.environment == RunningEnvironment::Development {
						Level::TRACE
					} else {
						Level::DEBUG
					},
				)),
		),
	))
	.expect("Failed to set global default subscriber");

	let database = db::connect(&config.database).await;

	let state = AppState { database, config };

	db::initialize(&state)
		.await
		.expect("Failed to initialize database");

	let listener = TcpListener::bind(state.config.bind_address)
		.await
		.expect("Failed to bind to address");

	info!(
		"Listening for connections on http://{}",
		state.config.bind_address
	);

	axum::serve(
		listener,
		routes::setup_routes(&state).into_make_service_with_connect_info::<SocketAddr>(),
	)
	.with_graceful_shutdown(exit_signal())
	.await
	.expect("Failed to start server");
}

/// Listen for the exit signal and stop the server when the signal is
/// received.
#[tracing::instrument]
async fn exit_signal() {
	let ctrl_c = async {
		tokio::signal::ctrl_c()
			.await
			.expect("Failed to listen for SIGINT")
	};

	#[cfg(unix)]
	let terminate = async {
		tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => (),
		_ = terminate => (),
	}
	info!("Shutdown signal received, shutting down server gracefully");
}
