use argon2::{
	password_hash::SaltString,
	Algorithm,
	Argon2,
	PasswordHash,
	PasswordHasher,
	PasswordVerifier,
	Version,
};

use crate::prelude::*;

/// The configuration of the application, parsed from a file and the
/// environment.
pub mod config;

/// All the constants used by the application.
pub mod constants {
	use semver::Version;

	/// The version of the database schema. This is written to the
	/// `meta_data` table when the database is created and checked on every
	/// startup after that.
	pub const DATABASE_VERSION: Version = Version::new(0, 1, 0);

	/// The parameters used for hashing passwords with argon2.
	pub const HASHING_PARAMS: argon2::Params =
		if let Ok(params) = argon2::Params::new(8192, 4, 4, None) {
			params
		} else {
			panic!("Failed to create hashing params");
		};

	/// The role every account is assigned on sign up.
	pub const DEFAULT_ROLE: &str = "user";

	/// The role whose rights apply to every row regardless of who owns it.
	pub const ADMIN_ROLE: &str = "admin";
}

/// Hashes a password into a PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ErrorType> {
	let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, constants::HASHING_PARAMS)
		.hash_password(
			password.as_bytes(),
			SaltString::generate(&mut rand::thread_rng()).as_salt(),
		)
		.inspect_err(|err| {
			error!("Error hashing password: `{}`", err);
		})
		.map_err(ErrorType::server_error)?
		.to_string();

	Ok(hash)
}

/// Verifies a password against a stored PHC string. Returns `false` when
/// the password does not match the hash.
pub fn validate_password(password: &str, hash: &str) -> Result<bool, ErrorType> {
	let parsed_hash = PasswordHash::new(hash)
		.inspect_err(|err| {
			error!("Unable to parse stored password hash: `{}`", err);
		})
		.map_err(ErrorType::server_error)?;

	let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, constants::HASHING_PARAMS);

	Ok(argon2
		.verify_password(password.as_bytes(), &parsed_hash)
		.is_ok())
}
