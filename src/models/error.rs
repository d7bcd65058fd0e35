use std::{
	error::Error as StdError,
	fmt::{Display, Formatter},
	mem,
};

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{de::Error, Deserialize, Serialize};

/// A list of all the possible errors that can be returned by the API
#[derive(Debug)]
pub enum ErrorType {
	/// The username and password combination does not match any account. The
	/// same error is returned whether the username is unknown or the
	/// password is wrong
	InvalidCredentials,
	/// The authentication token is missing, unknown or has expired. The same
	/// error is returned for all three cases
	AuthenticationTokenInvalid,
	/// The authentication token provided is not shaped like a token at all
	MalformedBearerToken,
	/// The authenticated user holds no right that allows the requested
	/// action on the requested row
	AccessDenied,
	/// The resource that the user is trying to access does not exist.
	ResourceDoesNotExist,
	/// The username provided is not available. It is being used by another
	/// account
	UsernameTaken,
	/// A right with the same resource, ownership and operation flags already
	/// exists
	DuplicateRight,
	/// A role with the same name already exists
	DuplicateRole,
	/// The parameters sent with the request is invalid. This would ideally
	/// not happen unless there is a bug in the client
	WrongParameters,
	/// An internal server error occurred. This should not happen unless
	/// there is a bug in the server
	InternalServerError(anyhow::Error),
}

impl ErrorType {
	/// Returns the status code that should be used for this error. Note that
	/// this is only the default status code and specific endpoints can
	/// override this if needed
	pub fn default_status_code(&self) -> StatusCode {
		match self {
			Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
			Self::AuthenticationTokenInvalid => StatusCode::UNAUTHORIZED,
			Self::MalformedBearerToken => StatusCode::BAD_REQUEST,
			Self::AccessDenied => StatusCode::FORBIDDEN,
			Self::ResourceDoesNotExist => StatusCode::NOT_FOUND,
			Self::UsernameTaken => StatusCode::CONFLICT,
			Self::DuplicateRight => StatusCode::CONFLICT,
			Self::DuplicateRole => StatusCode::CONFLICT,
			Self::WrongParameters => StatusCode::BAD_REQUEST,
			Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Returns the message that should be used for this error. This is the
	/// message that is user-friendly and can be shown to the user
	pub fn message(&self) -> impl Into<String> {
		match self {
			Self::InvalidCredentials => "No user exists with those credentials",
			Self::AuthenticationTokenInvalid => "The authentication token is invalid",
			Self::MalformedBearerToken => {
				"The authentication token provided is not a valid bearer token"
			}
			Self::AccessDenied => "Access denied",
			Self::ResourceDoesNotExist => "The resource you are trying to access does not exist",
			Self::UsernameTaken => "An account with that username already exists",
			Self::DuplicateRight => "A right with those properties already exists",
			Self::DuplicateRole => "A role with that name already exists",
			Self::WrongParameters => "The parameters sent with that request is invalid",
			Self::InternalServerError(_) => "An internal server error has occured",
		}
	}

	/// Creates an [`ErrorType::InternalServerError`] with the given message
	pub fn server_error(message: impl Display) -> Self {
		Self::InternalServerError(anyhow::anyhow!(message.to_string()))
	}
}

impl PartialEq for ErrorType {
	fn eq(&self, other: &Self) -> bool {
		mem::discriminant(self) == mem::discriminant(other)
	}
}

impl Eq for ErrorType {}

impl<Error> From<Error> for ErrorType
where
	Error: StdError + Send + Sync + 'static,
{
	fn from(error: Error) -> Self {
		Self::InternalServerError(error.into())
	}
}

impl Display for ErrorType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message().into())
	}
}

impl Serialize for ErrorType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Self::InvalidCredentials => serializer.serialize_str("invalidCredentials"),
			Self::AuthenticationTokenInvalid => {
				serializer.serialize_str("authenticationTokenInvalid")
			}
			Self::MalformedBearerToken => serializer.serialize_str("malformedBearerToken"),
			Self::AccessDenied => serializer.serialize_str("accessDenied"),
			Self::ResourceDoesNotExist => serializer.serialize_str("resourceDoesNotExist"),
			Self::UsernameTaken => serializer.serialize_str("usernameTaken"),
			Self::DuplicateRight => serializer.serialize_str("duplicateRight"),
			Self::DuplicateRole => serializer.serialize_str("duplicateRole"),
			Self::WrongParameters => serializer.serialize_str("wrongParameters"),
			Self::InternalServerError(_) => serializer.serialize_str("internalServerError"),
		}
	}
}

impl<'de> Deserialize<'de> for ErrorType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let string = String::deserialize(deserializer)?;
		Ok(match string.as_str() {
			"invalidCredentials" => Self::InvalidCredentials,
			"authenticationTokenInvalid" => Self::AuthenticationTokenInvalid,
			"malformedBearerToken" => Self::MalformedBearerToken,
			"accessDenied" => Self::AccessDenied,
			"resourceDoesNotExist" => Self::ResourceDoesNotExist,
			"usernameTaken" => Self::UsernameTaken,
			"duplicateRight" => Self::DuplicateRight,
			"duplicateRole" => Self::DuplicateRole,
			"wrongParameters" => Self::WrongParameters,
			"internalServerError" => {
				Self::InternalServerError(anyhow::anyhow!("Internal Server Error"))
			}
			unknown => return Err(Error::custom(format!("unknown variant: {unknown}"))),
		})
	}
}

impl IntoResponse for ErrorType {
	fn into_response(self) -> Response {
		if let Self::InternalServerError(error) = &self {
			tracing::error!("Internal server error: {}", error);
		}
		ApiErrorResponse::error(self).into_response()
	}
}

/// The response that is sent when an API call fails
#[derive(Debug)]
pub struct ApiErrorResponse {
	/// The status code of the response
	pub status_code: StatusCode,
	/// The body of the response
	pub body: ApiErrorResponseBody,
}

impl ApiErrorResponse {
	/// Creates an error response with the given error, using the default
	/// status code and message of that error
	pub fn error(error: ErrorType) -> Self {
		Self {
			status_code: error.default_status_code(),
			body: ApiErrorResponseBody {
				success: false,
				message: error.message().into(),
				error,
			},
		}
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		(self.status_code, Json(self.body)).into_response()
	}
}

/// The body of an error response
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponseBody {
	/// Always `false`, so that clients can check one field to know whether
	/// the call worked
	pub success: bool,
	/// A machine readable tag naming the error
	pub error: ErrorType,
	/// A user-friendly message describing what went wrong
	pub message: String,
}
