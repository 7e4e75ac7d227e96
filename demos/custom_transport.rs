//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`HttpTransport`] so it turns an [`HttpRequest`] into an [`HttpResponse`].
//! 2. Hand the transport to [`RestClient::with_credentials`] (or `set_http_client`).
//! 3. Branch on the typed [`Error`] kinds the client derives from each status code.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use vnw_client::{
	client::RestClient,
	error::{Error, TransportError},
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client: RestClient<MockTransport> = RestClient::with_credentials(
		"demo-key",
		"demo-secret",
		"api.example.com",
		MockTransport::default(),
	);
	let envelope = client.get("jobs", "good-token", [("q", "rust")], &[]).await?;

	println!("Mock transport answered {}: {:?}.", envelope.http_response_code, envelope);

	for (uri, token) in [("jobs", "stale-token"), ("nowhere", "good-token"), ("jobs", "")] {
		match client.get(uri, token, Vec::<(String, String)>::new(), &[]).await {
			Ok(_) => println!("Request to {uri} unexpectedly succeeded."),
			Err(e) if e.is_expired_token() => println!("Token for {uri} expired: {e}."),
			Err(Error::Transport(e)) => println!("Transport failed for {uri}: {e}."),
			Err(e) => println!("Request to {uri} failed with status {:?}: {e}.", e.status()),
		}
	}

	Ok(())
}

#[derive(Debug)]
struct MissingCredentials;
impl Display for MissingCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "mock transport refuses anonymous requests")
	}
}
impl StdError for MissingCredentials {}

#[derive(Clone, Debug, Default)]
struct MockTransport;
impl MockTransport {
	fn respond(request: &HttpRequest) -> Result<HttpResponse, Error> {
		let Some(bearer) = &request.bearer else {
			return Err(TransportError::network(MissingCredentials).into());
		};

		if bearer.expose() == "stale-token" {
			return Ok(HttpResponse::new(401, "{\"error\":\"invalid_grant\"}"));
		}
		if request.url.path() != "/jobs" {
			return Ok(HttpResponse::new(404, "{\"message\":\"Unknown resource.\"}"));
		}

		Ok(HttpResponse::new(200, "{\"data\":[{\"id\":1,\"title\":\"Rust Engineer\"}]}"))
	}
}
impl HttpTransport for MockTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		let outcome = Self::respond(&request);

		Box::pin(async move { outcome })
	}
}
