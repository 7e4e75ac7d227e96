// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use vnw_client::{
	client::{ResponseBody, RestClient},
	config::ClientConfig,
	error::{Error, INVALID_CREDENTIALS, MISSING_REQUIRED_PARAMETERS},
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportFuture},
};

const HOST: &str = "api.vietnamworks.com";

/// Replays scripted responses in order and records every request it receives.
#[derive(Clone, Default)]
struct ScriptedTransport {
	responses: Arc<Mutex<VecDeque<HttpResponse>>>,
	requests: Arc<Mutex<Vec<HttpRequest>>>,
}
impl ScriptedTransport {
	fn replying(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
		let responses =
			responses.into_iter().map(|(status, body)| HttpResponse::new(status, body)).collect();

		Self { responses: Arc::new(Mutex::new(responses)), requests: Default::default() }
	}

	fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}
}
impl HttpTransport for ScriptedTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		self.requests.lock().push(request);

		let response =
			self.responses.lock().pop_front().expect("Scripted transport ran out of responses.");

		Box::pin(async move { Ok(response) })
	}
}

fn client(transport: &ScriptedTransport) -> RestClient<ScriptedTransport> {
	RestClient::with_credentials("key", "secret", HOST, transport.clone())
}

#[tokio::test]
async fn get_builds_query_url_without_body() {
	let transport = ScriptedTransport::replying([(200, "{\"data\":[]}")]);
	let client = client(&transport);

	client
		.get("/jobs", "token-1", [("q", "engineer"), ("page", "2")], &[])
		.await
		.expect("GET should succeed.");

	let requests = transport.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, HttpMethod::Get);
	assert!(requests[0].url.as_str().ends_with("/jobs?q=engineer&page=2"));
	assert_eq!(requests[0].body, RequestBody::Empty);
	assert_eq!(requests[0].bearer.as_ref().map(|secret| secret.expose()), Some("token-1"));
}

#[tokio::test]
async fn post_request_sends_json_text() {
	let transport = ScriptedTransport::replying([(200, "")]);
	let client = client(&transport);

	client
		.post_request("/jobs", "token-1", &serde_json::json!({ "title": "Engineer" }), &[])
		.await
		.expect("POST should succeed.");

	let request = &transport.requests()[0];

	assert_eq!(request.method, HttpMethod::Post);
	assert_eq!(request.header("content-type"), Some("application/json"));
	assert_eq!(request.body, RequestBody::Text("{\"title\":\"Engineer\"}".into()));
}

#[tokio::test]
async fn only_status_200_is_success() {
	let transport =
		ScriptedTransport::replying([(201, "{\"id\":1}"), (304, ""), (200, "{\"a\":1}")]);
	let client = client(&transport);
	let created = client
		.send(HttpMethod::Post, "jobs", "t", RequestBody::Empty, &[])
		.await
		.expect_err("201 is not success.");
	let not_modified = client
		.send(HttpMethod::Get, "jobs", "t", RequestBody::Empty, &[])
		.await
		.expect_err("304 is not success.");
	let ok = client
		.send(HttpMethod::Get, "jobs", "t", RequestBody::Empty, &[])
		.await
		.expect("200 is success.");

	assert!(matches!(created, Error::GenericHttp { status: 201, .. }));
	assert!(matches!(not_modified, Error::GenericHttp { status: 304, .. }));
	assert_eq!(ok.http_response_body, ResponseBody::Json(serde_json::json!({ "a": 1 })));
	assert_eq!(ok.http_response_code, 200);
}

#[tokio::test]
async fn unauthorized_responses_split_by_error_code() {
	let transport = ScriptedTransport::replying([
		(401, "{\"error\":\"invalid_grant\"}"),
		(401, "{\"error\":\"bad_request\"}"),
		(401, "Unauthorized"),
	]);
	let client = client(&transport);
	let mut kinds = Vec::new();

	for _ in 0..3 {
		let err = client
			.get("me", "stale", Vec::<(String, String)>::new(), &[])
			.await
			.expect_err("401 should fail.");

		assert_eq!(err.to_string(), INVALID_CREDENTIALS);

		kinds.push(err.is_expired_token());
	}

	assert_eq!(kinds, vec![true, false, false]);
}

#[tokio::test]
async fn bad_request_message_keeps_leading_space() {
	let transport = ScriptedTransport::replying([(400, "{\"message\":\"field X required\"}")]);
	let client = client(&transport);
	let err = client
		.post_request("jobs", "t", &serde_json::json!({}), &[])
		.await
		.expect_err("400 should fail.");

	assert_eq!(err.to_string(), format!("{MISSING_REQUIRED_PARAMETERS} field X required"));
}

#[tokio::test]
async fn client_without_transport_reports_configuration_error() {
	let client = RestClient::<ScriptedTransport>::from_config(ClientConfig::new("k", "s", HOST));
	let err = client
		.post_request("jobs", "t", &serde_json::json!({}), &[])
		.await
		.expect_err("Missing transport must fail.");

	assert!(matches!(err, Error::Config(_)));
	assert_eq!(err.status(), None);
}
