//! Client-level error types shared across the REST client, transports, and token stores.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message attached to [`Error::MissingRequiredParameters`] before any server detail.
pub const MISSING_REQUIRED_PARAMETERS: &str =
	"The parameters passed to the API were invalid. Check your inputs!";
/// Message shared by [`Error::ExpiredToken`] and [`Error::InvalidCredentials`].
pub const INVALID_CREDENTIALS: &str = "Your credentials are incorrect.";
/// Message attached to [`Error::MissingEndpoint`] before any server detail.
pub const MISSING_ENDPOINT: &str =
	"The endpoint you've tried to access does not exist. Check your URL.";
/// Message carried by [`Error::GenericHttp`].
pub const GENERIC_HTTP_ERROR: &str =
	"An HTTP Error has occurred! Check your network connection and try again.";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request payload could not be encoded as JSON.
	#[error("Request payload could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// Response body could not be decoded into the requested type.
	#[error("Response body could not be decoded at `{}`.", .source.path())]
	Decode {
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},

	/// API answered 400: a required parameter is missing or malformed.
	#[error("{message}")]
	MissingRequiredParameters {
		/// Fixed prefix plus the server-supplied detail, if any.
		message: String,
	},
	/// API answered 401 with `invalid_grant`: the bearer token has expired.
	#[error("{message}")]
	ExpiredToken {
		/// Human-readable message.
		message: String,
	},
	/// API answered 401 for any reason other than an expired token.
	#[error("{message}")]
	InvalidCredentials {
		/// Human-readable message.
		message: String,
	},
	/// API answered 404: the endpoint does not exist.
	#[error("{message}")]
	MissingEndpoint {
		/// Fixed prefix plus the server-supplied detail, if any.
		message: String,
	},
	/// API answered with any status other than 200, 400, 401, or 404.
	#[error("{message} (HTTP {status})")]
	GenericHttp {
		/// Human-readable message.
		message: String,
		/// HTTP status code returned by the API.
		status: u16,
		/// Raw response body.
		body: String,
	},
}
impl Error {
	/// Returns `true` when the API reported that the bearer token expired.
	pub fn is_expired_token(&self) -> bool {
		matches!(self, Self::ExpiredToken { .. })
	}

	/// Returns the HTTP status code implied by an API error kind, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::MissingRequiredParameters { .. } => Some(400),
			Self::ExpiredToken { .. } | Self::InvalidCredentials { .. } => Some(401),
			Self::MissingEndpoint { .. } => Some(404),
			Self::GenericHttp { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A request was issued before any HTTP client was configured.
	#[error("No HTTP client is configured; call `set_http_client` before sending requests.")]
	MissingHttpClient,
	/// API host and path do not form a valid URL.
	#[error("Endpoint `{url}` is not a valid URL.")]
	InvalidUrl {
		/// The rejected URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configuration document could not be parsed.
	#[error("Client configuration is invalid.")]
	InvalidConfig {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A file attached to an upload could not be read.
	#[error("Upload file `{}` could not be read.", .path.display())]
	UnreadableUpload {
		/// Path that was requested.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
