//! Transport primitives for API calls.
//!
//! The module exposes [`HttpTransport`] alongside the plain-data [`HttpRequest`] and
//! [`HttpResponse`] types so downstream crates can plug in their own HTTP stack. The
//! [`RestClient`](crate::client::RestClient) builds one [`HttpRequest`] per call, hands it to the
//! transport exactly once, and classifies whatever [`HttpResponse`] comes back. Timeouts and
//! connection reuse are the transport's business.

// std
use std::{fs, path::Path};
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};
#[cfg(feature = "reqwest")] use crate::error::TransportError;

/// Future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of performing one request and reporting the status
/// code and body text.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// several clients behind an `Arc`.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Performs `request` and resolves to the raw response.
	///
	/// Non-2xx statuses are not errors at this layer; only failures to obtain a response at all
	/// (DNS, TLS, IO, malformed request) should resolve to `Err`.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse>;
}

/// HTTP verbs the client can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the canonical upper-case method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<HttpMethod> for reqwest::Method {
	fn from(method: HttpMethod) -> Self {
		match method {
			HttpMethod::Get => Self::GET,
			HttpMethod::Post => Self::POST,
			HttpMethod::Put => Self::PUT,
			HttpMethod::Patch => Self::PATCH,
			HttpMethod::Delete => Self::DELETE,
		}
	}
}

/// Payload attached to an outbound request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
	/// No payload.
	#[default]
	Empty,
	/// Literal text payload, sent as-is.
	Text(String),
	/// `multipart/form-data` payload; the transport picks the boundary.
	Multipart(Vec<MultipartPart>),
}
impl RequestBody {
	/// Returns `true` when nothing would be sent: no variant, empty text, or no parts.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Text(text) => text.is_empty(),
			Self::Multipart(parts) => parts.is_empty(),
		}
	}
}

/// One named field of a multipart payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartPart {
	/// Form field name.
	pub name: String,
	/// Raw field contents.
	pub contents: Vec<u8>,
	/// File name advertised for file fields.
	pub filename: Option<String>,
}
impl MultipartPart {
	/// Builds a plain text field.
	pub fn text(name: impl Into<String>, contents: impl Into<String>) -> Self {
		Self { name: name.into(), contents: contents.into().into_bytes(), filename: None }
	}

	/// Builds a file field.
	pub fn file(
		name: impl Into<String>,
		filename: impl Into<String>,
		contents: impl Into<Vec<u8>>,
	) -> Self {
		Self { name: name.into(), contents: contents.into(), filename: Some(filename.into()) }
	}
}

/// File attached to a multipart `post`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
	/// Form field name the file is sent under.
	pub name: String,
	/// File name advertised to the API.
	pub file_name: String,
	/// File bytes.
	pub contents: Vec<u8>,
}
impl FileUpload {
	/// Wraps in-memory bytes.
	pub fn new(
		name: impl Into<String>,
		file_name: impl Into<String>,
		contents: impl Into<Vec<u8>>,
	) -> Self {
		Self { name: name.into(), file_name: file_name.into(), contents: contents.into() }
	}

	/// Reads `path` eagerly; the advertised file name is the path's final component.
	pub fn from_path(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read(path).map_err(|source| ConfigError::UnreadableUpload {
			path: path.to_path_buf(),
			source,
		})?;
		let file_name = path
			.file_name()
			.map(|value| value.to_string_lossy().into_owned())
			.unwrap_or_default();

		Ok(Self { name: name.into(), file_name, contents })
	}

	/// Converts the upload into a multipart file field.
	pub fn into_part(self) -> MultipartPart {
		MultipartPart::file(self.name, self.file_name, self.contents)
	}
}

/// Fully resolved request handed to an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute request URL, query string included.
	pub url: Url,
	/// Request headers in caller order.
	pub headers: Vec<(String, String)>,
	/// Bearer credential for the `Authorization` header, if any.
	pub bearer: Option<TokenSecret>,
	/// Request payload.
	pub body: RequestBody,
}
impl HttpRequest {
	/// Looks up a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Status code and body text returned by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
		let HttpRequest { method, url, headers, bearer, body } = request;
		let mut builder = self.0.request(method.into(), url);

		if let Some(bearer) = bearer {
			builder = builder.bearer_auth(bearer.expose());
		}
		for (name, value) in headers {
			builder = builder.header(name, value);
		}

		builder = match body {
			RequestBody::Empty => builder,
			RequestBody::Text(text) => builder.body(text),
			RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)),
		};

		let response = builder.send().await.map_err(map_reqwest_error)?;
		let status = response.status().as_u16();
		let body = response.text().await.map_err(map_reqwest_error)?;

		Ok(HttpResponse { status, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		Box::pin(self.dispatch(request))
	}
}

#[cfg(feature = "reqwest")]
fn multipart_form(parts: Vec<MultipartPart>) -> reqwest::multipart::Form {
	parts.into_iter().fold(reqwest::multipart::Form::new(), |form, part| {
		let MultipartPart { name, contents, filename } = part;
		let mut field = reqwest::multipart::Part::bytes(contents);

		if let Some(filename) = filename {
			field = field.file_name(filename);
		}

		form.part(name, field)
	})
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}
