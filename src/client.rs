//! REST client that authenticates, builds, dispatches, and classifies API calls.

pub mod response;

pub use response::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret},
	config::ClientConfig,
	error::ConfigError,
	http::{FileUpload, HttpMethod, HttpRequest, HttpTransport, MultipartPart, RequestBody},
	obs::{self, RequestOutcome, RequestSpan},
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Multipart field that carries the JSON-encoded payload of [`RestClient::post`].
pub const JSON_PART_NAME: &str = "json";

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestRestClient = RestClient<ReqwestHttpClient>;

/// Calls the API with a bearer token and maps each response onto a [`ResponseEnvelope`] or a
/// typed [`Error`].
///
/// The client owns its [`ClientConfig`] and an optional transport and token store. Every verb
/// resolves the endpoint as `scheme://api_host/` followed by the caller's path, performs exactly
/// one transport call, and treats only HTTP 200 as success. Configuration setters take
/// `&mut self`, so changing settings between calls needs exclusive access.
#[derive(Clone)]
pub struct RestClient<C>
where
	C: ?Sized + HttpTransport,
{
	config: ClientConfig,
	http_client: Option<Arc<C>>,
	token_store: Option<Arc<dyn TokenStore>>,
}
impl<C> RestClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client without a transport; one must be supplied through
	/// [`RestClient::set_http_client`] or [`RestClient::with_http_client`] before any call.
	pub fn from_config(config: ClientConfig) -> Self {
		Self { config, http_client: None, token_store: None }
	}

	/// Creates a client from credentials and host that reuses the caller-provided transport.
	pub fn with_credentials(
		api_key: impl Into<String>,
		api_secret: impl Into<TokenSecret>,
		api_host: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self::from_config(ClientConfig::new(api_key, api_secret, api_host))
			.with_http_client(http_client)
	}

	/// Sets or replaces the transport, consuming the client.
	pub fn with_http_client(mut self, http_client: impl Into<Arc<C>>) -> Self {
		self.http_client = Some(http_client.into());

		self
	}

	/// Sets or replaces the token store, consuming the client.
	pub fn with_token_store(mut self, token_store: Arc<dyn TokenStore>) -> Self {
		self.token_store = Some(token_store);

		self
	}

	/// Returns the active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the configured transport, if any.
	pub fn http_client(&self) -> Option<&Arc<C>> {
		self.http_client.as_ref()
	}

	/// Sets or replaces the transport.
	pub fn set_http_client(&mut self, http_client: impl Into<Arc<C>>) -> &mut Self {
		self.http_client = Some(http_client.into());

		self
	}

	/// Overrides the stored API version label.
	pub fn set_api_version(&mut self, api_version: impl Into<String>) -> &mut Self {
		self.config.api_version = api_version.into();

		self
	}

	/// Switches between `https` (`true`) and `http` (`false`) endpoints.
	pub fn set_ssl_enabled(&mut self, ssl_enabled: bool) -> &mut Self {
		self.config.ssl_enabled = ssl_enabled;

		self
	}

	/// Returns the configured token store, if any.
	pub fn token_store(&self) -> Option<&Arc<dyn TokenStore>> {
		self.token_store.as_ref()
	}

	/// Sets or replaces the token store.
	pub fn set_token_store(&mut self, token_store: Arc<dyn TokenStore>) -> &mut Self {
		self.token_store = Some(token_store);

		self
	}

	/// Reads the token pair from the configured store; `None` when no store is set or the
	/// store is empty.
	pub async fn stored_token(&self) -> Result<Option<AccessToken>> {
		match &self.token_store {
			Some(store) => Ok(store.get().await?),
			None => Ok(None),
		}
	}

	/// Resolves `uri` against the configuration and assembles the outbound request.
	///
	/// An empty `access_token` sends no `Authorization` header; empty `headers` and an empty
	/// `body` are likewise omitted.
	pub fn build_request(
		&self,
		method: HttpMethod,
		uri: &str,
		access_token: &str,
		body: RequestBody,
		headers: &[(&str, &str)],
	) -> Result<HttpRequest> {
		let url = self.config.endpoint(uri)?;
		let bearer = (!access_token.is_empty()).then(|| TokenSecret::new(access_token));
		let headers =
			headers.iter().map(|(name, value)| ((*name).to_owned(), (*value).to_owned())).collect();
		let body = if body.is_empty() { RequestBody::Empty } else { body };

		Ok(HttpRequest { method, url, headers, bearer, body })
	}

	/// Sends one request and classifies the response.
	///
	/// Fails with [`ConfigError::MissingHttpClient`] when no transport is configured.
	pub async fn send(
		&self,
		method: HttpMethod,
		uri: &str,
		access_token: &str,
		body: RequestBody,
		headers: &[(&str, &str)],
	) -> Result<ResponseEnvelope> {
		let http_client = self.http_client.as_ref().ok_or(ConfigError::MissingHttpClient)?;
		let request = self.build_request(method, uri, access_token, body, headers)?;
		let span = RequestSpan::new(method, "send");

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let raw = http_client.execute(request).await?;

				obs::trace_response_status(raw.status);

				response::classify(raw)
			})
			.await;

		if let Err(e) = &result {
			obs::trace_request_failure(e);
		}

		obs::record_request_outcome(method, RequestOutcome::of(&result));

		result
	}

	/// Issues a `GET` with `query` URL-encoded and appended after `?`, in caller order.
	///
	/// No `?` is appended when `query` is empty.
	pub async fn get<I, K, V>(
		&self,
		endpoint_url: &str,
		access_token: &str,
		query: I,
		headers: &[(&str, &str)],
	) -> Result<ResponseEnvelope>
	where
		I: IntoIterator,
		I::Item: Borrow<(K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let uri = with_query(endpoint_url, query);

		self.send(HttpMethod::Get, &uri, access_token, RequestBody::Empty, headers).await
	}

	/// Issues a multipart `POST`: a [`JSON_PART_NAME`] field holding `post_data` as JSON,
	/// followed by `file` when one is given.
	pub async fn post<T>(
		&self,
		endpoint_url: &str,
		access_token: &str,
		post_data: &T,
		file: Option<FileUpload>,
		headers: &[(&str, &str)],
	) -> Result<ResponseEnvelope>
	where
		T: ?Sized + Serialize,
	{
		let json = serde_json::to_string(post_data).map_err(Error::Encode)?;
		let mut parts = vec![MultipartPart::text(JSON_PART_NAME, json)];

		if let Some(file) = file {
			parts.push(file.into_part());
		}

		self.send(
			HttpMethod::Post,
			endpoint_url,
			access_token,
			RequestBody::Multipart(parts),
			headers,
		)
		.await
	}

	/// Issues a `POST` whose body is the JSON text of `post_data`.
	///
	/// Sends `Content-Type: application/json` unless the caller supplies headers of their own.
	pub async fn post_request<T>(
		&self,
		endpoint_url: &str,
		access_token: &str,
		post_data: &T,
		headers: &[(&str, &str)],
	) -> Result<ResponseEnvelope>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_string(post_data).map_err(Error::Encode)?;
		let default_headers = [JSON_CONTENT_TYPE];
		let headers = if headers.is_empty() { &default_headers[..] } else { headers };

		self.send(HttpMethod::Post, endpoint_url, access_token, RequestBody::Text(body), headers)
			.await
	}
}
#[cfg(feature = "reqwest")]
impl RestClient<ReqwestHttpClient> {
	/// Creates a new client for the provided credentials and host.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(
		api_key: impl Into<String>,
		api_secret: impl Into<TokenSecret>,
		api_host: impl Into<String>,
	) -> Self {
		Self::with_credentials(api_key, api_secret, api_host, ReqwestHttpClient::default())
	}
}
impl<C> Debug for RestClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RestClient")
			.field("config", &self.config)
			.field("http_client_set", &self.http_client.is_some())
			.field("token_store_set", &self.token_store.is_some())
			.finish()
	}
}

fn with_query<I, K, V>(endpoint_url: &str, query: I) -> String
where
	I: IntoIterator,
	I::Item: Borrow<(K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let encoded = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(query).finish();

	if encoded.is_empty() { endpoint_url.to_owned() } else { format!("{endpoint_url}?{encoded}") }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{RecordingTransport, TEST_API_HOST, build_test_client},
		error::GENERIC_HTTP_ERROR,
		store::MemoryStore,
	};

	#[test]
	fn query_is_encoded_in_caller_order() {
		assert_eq!(
			with_query("/jobs", [("q", "engineer"), ("page", "2")]),
			"/jobs?q=engineer&page=2"
		);
		assert_eq!(
			with_query("jobs", [("q", "rust & go"), ("city", "Hồ Chí Minh")]),
			"jobs?q=rust+%26+go&city=H%E1%BB%93+Ch%C3%AD+Minh"
		);
		assert_eq!(with_query("jobs", Vec::<(String, String)>::new()), "jobs");
	}

	#[test]
	fn build_request_omits_empty_token_headers_and_body() {
		let client = build_test_client(RecordingTransport::responding(200, ""));
		let request = client
			.build_request(HttpMethod::Get, "jobs", "", RequestBody::Text(String::new()), &[])
			.expect("Request should build.");

		assert_eq!(request.url.as_str(), format!("https://{TEST_API_HOST}/jobs"));
		assert!(request.bearer.is_none());
		assert!(request.headers.is_empty());
		assert_eq!(request.body, RequestBody::Empty);
	}

	#[test]
	fn build_request_attaches_bearer_and_headers() {
		let client = build_test_client(RecordingTransport::responding(200, ""));
		let request = client
			.build_request(
				HttpMethod::Post,
				"jobs",
				"token-123",
				RequestBody::Text("{}".into()),
				&[("X-Trace", "abc")],
			)
			.expect("Request should build.");

		assert_eq!(request.bearer.as_ref().map(TokenSecret::expose), Some("token-123"));
		assert_eq!(request.header("x-trace"), Some("abc"));
		assert_eq!(request.body, RequestBody::Text("{}".into()));
	}

	#[test]
	fn ssl_toggle_changes_scheme_for_following_requests() {
		let mut client = build_test_client(RecordingTransport::responding(200, ""));

		client.set_ssl_enabled(false).set_api_version("v3");

		let request = client
			.build_request(HttpMethod::Get, "jobs", "", RequestBody::Empty, &[])
			.expect("Request should build.");

		assert_eq!(request.url.scheme(), "http");
		assert_eq!(client.config().api_version, "v3");
	}

	#[tokio::test]
	async fn get_sends_query_and_returns_envelope() {
		let transport = RecordingTransport::responding(200, "{\"total\":1}");
		let client = build_test_client(transport.clone());
		let envelope = client
			.get("jobs", "token-abc", [("q", "engineer"), ("page", "2")], &[])
			.await
			.expect("GET should succeed.");
		let request = transport.last_request();

		assert_eq!(request.method, HttpMethod::Get);
		assert_eq!(request.url.as_str(), format!("https://{TEST_API_HOST}/jobs?q=engineer&page=2"));
		assert_eq!(request.body, RequestBody::Empty);
		assert_eq!(envelope.http_response_body.as_json(), Some(&serde_json::json!({ "total": 1 })));
	}

	#[tokio::test]
	async fn post_request_defaults_json_content_type() {
		let transport = RecordingTransport::responding(200, "");
		let client = build_test_client(transport.clone());

		client
			.post_request("jobs", "token-abc", &serde_json::json!({ "title": "Engineer" }), &[])
			.await
			.expect("POST should succeed.");

		let request = transport.last_request();

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(request.header("Content-Type"), Some("application/json"));
		assert_eq!(request.body, RequestBody::Text("{\"title\":\"Engineer\"}".into()));
	}

	#[tokio::test]
	async fn post_request_keeps_caller_headers() {
		let transport = RecordingTransport::responding(200, "");
		let client = build_test_client(transport.clone());

		client
			.post_request("jobs", "", &serde_json::json!({}), &[("Content-Type", "text/plain")])
			.await
			.expect("POST should succeed.");

		let request = transport.last_request();

		assert_eq!(request.headers, vec![("Content-Type".to_owned(), "text/plain".to_owned())]);
	}

	#[tokio::test]
	async fn post_builds_json_part_then_file_part() {
		let transport = RecordingTransport::responding(200, "");
		let client = build_test_client(transport.clone());
		let upload = FileUpload::new("cv", "resume.pdf", b"%PDF".to_vec());

		client
			.post("applications", "token", &serde_json::json!({ "job_id": 7 }), Some(upload), &[])
			.await
			.expect("Multipart POST should succeed.");

		match transport.last_request().body {
			RequestBody::Multipart(parts) => {
				assert_eq!(parts.len(), 2);
				assert_eq!(parts[0], MultipartPart::text(JSON_PART_NAME, "{\"job_id\":7}"));
				assert_eq!(parts[1], MultipartPart::file("cv", "resume.pdf", b"%PDF".to_vec()));
			},
			other => panic!("Expected a multipart body, got {other:?}."),
		}
	}

	#[tokio::test]
	async fn send_without_transport_fails_fast() {
		let client = RestClient::<RecordingTransport>::from_config(ClientConfig::new(
			"key",
			"secret",
			TEST_API_HOST,
		));
		let err = client
			.get("jobs", "", Vec::<(String, String)>::new(), &[])
			.await
			.expect_err("A client without transport must not send.");

		assert!(matches!(err, Error::Config(ConfigError::MissingHttpClient)));
	}

	#[tokio::test]
	async fn late_transport_is_used() {
		let transport = RecordingTransport::responding(503, "down");
		let mut client = RestClient::<RecordingTransport>::from_config(ClientConfig::new(
			"key",
			"secret",
			TEST_API_HOST,
		));

		client.set_http_client(transport.clone());

		let err = client
			.send(HttpMethod::Delete, "jobs/7", "token", RequestBody::Empty, &[])
			.await
			.expect_err("503 should fail.");

		assert!(matches!(
			err,
			Error::GenericHttp { status: 503, ref message, .. } if message == GENERIC_HTTP_ERROR
		));
		assert_eq!(transport.requests().len(), 1);
	}

	#[tokio::test]
	async fn identical_gets_yield_equal_envelopes() {
		let transport = RecordingTransport::responding(200, "{\"jobs\":[]}");
		let client = build_test_client(transport.clone());
		let first =
			client.get("jobs", "t", [("q", "rust")], &[]).await.expect("GET should succeed.");
		let second =
			client.get("jobs", "t", [("q", "rust")], &[]).await.expect("GET should succeed.");

		assert_eq!(first, second);
		assert_eq!(transport.requests().len(), 2);
	}

	#[tokio::test]
	async fn stored_token_reads_through_the_store() {
		let client = build_test_client(RecordingTransport::responding(200, ""));

		assert_eq!(client.stored_token().await.expect("No store should read as empty."), None);

		let token = AccessToken::new("access", "refresh");
		let client = client.with_token_store(Arc::new(MemoryStore::with_token(token.clone())));

		assert_eq!(client.stored_token().await.expect("Store read should succeed."), Some(token));
	}

	#[test]
	fn transport_trait_is_object_safe() {
		let transport: Arc<dyn HttpTransport> = Arc::new(RecordingTransport::responding(200, ""));
		let client = RestClient::<dyn HttpTransport>::from_config(ClientConfig::new(
			"key",
			"secret",
			TEST_API_HOST,
		))
		.with_http_client(transport);

		assert!(client.http_client().is_some());
		assert!(format!("{client:?}").contains("http_client_set: true"));
	}
}
