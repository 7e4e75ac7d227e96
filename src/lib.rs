//! Thin bearer-token REST client for the VietnamWorks API—pluggable transports, typed HTTP
//! error mapping, and swappable token stores.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::RestClient,
		config::ClientConfig,
		http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	};

	/// API host used by clients built through [`build_test_client`].
	pub const TEST_API_HOST: &str = "api.vietnamworks.test";

	/// In-process transport that answers every request with one canned response and keeps a
	/// copy of each request it was handed.
	#[derive(Clone, Debug)]
	pub struct RecordingTransport {
		response: HttpResponse,
		requests: Arc<Mutex<Vec<HttpRequest>>>,
	}
	impl RecordingTransport {
		/// Builds a transport that always answers with `status` and `body`.
		pub fn responding(status: u16, body: impl Into<String>) -> Self {
			Self { response: HttpResponse::new(status, body), requests: Default::default() }
		}

		/// Returns every request dispatched so far, oldest first.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}

		/// Returns the most recent request, panicking when nothing was sent.
		pub fn last_request(&self) -> HttpRequest {
			self.requests
				.lock()
				.last()
				.cloned()
				.expect("Recording transport should have received at least one request.")
		}
	}
	impl HttpTransport for RecordingTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
			self.requests.lock().push(request);

			let response = self.response.clone();

			Box::pin(async move { Ok(response) })
		}
	}

	/// Constructs a [`RestClient`] pointed at [`TEST_API_HOST`] and backed by `transport`.
	pub fn build_test_client(transport: RecordingTransport) -> RestClient<RecordingTransport> {
		RestClient::from_config(ClientConfig::new("test-key", "test-secret", TEST_API_HOST))
			.with_http_client(transport)
	}
}

mod _prelude {
	pub use std::{
		borrow::Borrow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
