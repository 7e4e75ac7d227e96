//! Success envelope and the status-code classification applied to every response.

// self
use crate::{
	_prelude::*,
	error::{
		GENERIC_HTTP_ERROR, INVALID_CREDENTIALS, MISSING_ENDPOINT, MISSING_REQUIRED_PARAMETERS,
	},
	http::HttpResponse,
};

/// OAuth-style error code the API uses to signal an expired bearer token.
const EXPIRED_TOKEN_ERROR: &str = "invalid_grant";

/// Body of a successful response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
	/// The API sent no body; serializes as `null`.
	Empty,
	/// The body parsed as JSON.
	Json(Value),
	/// The body was not valid JSON and is kept verbatim.
	Raw(String),
}
impl ResponseBody {
	/// Parses `body` as JSON, falling back to the raw text; an empty body stays empty.
	pub fn from_text(body: String) -> Self {
		if body.is_empty() {
			return Self::Empty;
		}

		match serde_json::from_str(&body) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Raw(body),
		}
	}

	/// Returns the parsed JSON value, if the body was JSON.
	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Self::Json(value) => Some(value),
			_ => None,
		}
	}
}

/// Result of a call that the API answered with 200.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseEnvelope {
	/// Parsed or raw response body.
	pub http_response_body: ResponseBody,
	/// Echoed HTTP status code.
	pub http_response_code: u16,
}
impl ResponseEnvelope {
	/// Decodes the body into `T`, reporting the JSON path of the first mismatch.
	///
	/// An empty body decodes as JSON `null`, so `Option<T>` targets yield `None`.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let decoded = match &self.http_response_body {
			ResponseBody::Json(value) => serde_path_to_error::deserialize(value),
			ResponseBody::Empty => serde_path_to_error::deserialize(&Value::Null),
			ResponseBody::Raw(text) => {
				let mut de = serde_json::Deserializer::from_str(text);

				serde_path_to_error::deserialize(&mut de)
			},
		};

		decoded.map_err(|source| Error::Decode { source })
	}
}

/// Maps a transport response onto the success envelope or a typed API error.
///
/// Only 200 counts as success; every other status, 2xx and 3xx included, is an error.
pub(crate) fn classify(response: HttpResponse) -> Result<ResponseEnvelope> {
	let HttpResponse { status, body } = response;

	match status {
		200 => Ok(ResponseEnvelope {
			http_response_body: ResponseBody::from_text(body),
			http_response_code: status,
		}),
		400 => Err(Error::MissingRequiredParameters {
			message: with_detail(MISSING_REQUIRED_PARAMETERS, &body),
		}),
		// A 401 body that is not JSON, or lacks `error`, counts as bad credentials.
		401 if is_expired_token(&body) =>
			Err(Error::ExpiredToken { message: INVALID_CREDENTIALS.into() }),
		401 => Err(Error::InvalidCredentials { message: INVALID_CREDENTIALS.into() }),
		404 => Err(Error::MissingEndpoint { message: with_detail(MISSING_ENDPOINT, &body) }),
		_ => Err(Error::GenericHttp { message: GENERIC_HTTP_ERROR.into(), status, body }),
	}
}

/// Extracts `" " + message` from a JSON error body.
pub(crate) fn error_message_suffix(body: &str) -> Option<String> {
	let parsed = serde_json::from_str::<Value>(body).ok()?;
	let message = match parsed.get("message")? {
		Value::Null => return None,
		Value::String(text) => text.to_owned(),
		other => other.to_string(),
	};

	Some(format!(" {message}"))
}

fn with_detail(prefix: &str, body: &str) -> String {
	match error_message_suffix(body) {
		Some(suffix) => format!("{prefix}{suffix}"),
		None => prefix.to_owned(),
	}
}

fn is_expired_token(body: &str) -> bool {
	serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|parsed| parsed.get("error").and_then(Value::as_str).map(str::to_owned))
		.is_some_and(|code| code == EXPIRED_TOKEN_ERROR)
}
