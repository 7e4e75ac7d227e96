//! Client configuration: API credentials, host, version, and scheme selection.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// API credentials and endpoint settings carried by every
/// [`RestClient`](crate::client::RestClient).
///
/// `api_secret` is kept alongside the key for callers that need it but never enters request
/// construction. `api_version` is likewise stored without being interpolated into endpoint
/// URLs; deployments that need a versioned path bake it into `api_host` or the request path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Public API key.
	pub api_key: String,
	/// API secret paired with the key.
	pub api_secret: TokenSecret,
	/// Host (and optional port or path prefix) of the API, without scheme.
	pub api_host: String,
	/// API version label; defaults to [`ClientConfig::DEFAULT_API_VERSION`].
	#[serde(default = "ClientConfig::default_api_version")]
	pub api_version: String,
	/// Selects `https` when `true` (the default) and `http` otherwise.
	#[serde(default = "ClientConfig::default_ssl_enabled")]
	pub ssl_enabled: bool,
}
impl ClientConfig {
	/// Version label used when none is configured.
	pub const DEFAULT_API_VERSION: &'static str = "v2";

	/// Creates a configuration with the default version and SSL enabled.
	pub fn new(
		api_key: impl Into<String>,
		api_secret: impl Into<TokenSecret>,
		api_host: impl Into<String>,
	) -> Self {
		Self {
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			api_host: api_host.into(),
			api_version: Self::default_api_version(),
			ssl_enabled: Self::default_ssl_enabled(),
		}
	}

	/// Parses a JSON configuration document; missing optional fields take their defaults.
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::InvalidConfig { source }.into())
	}

	/// Overrides the API version label.
	pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
		self.api_version = api_version.into();

		self
	}

	/// Overrides the scheme selection.
	pub fn with_ssl_enabled(mut self, ssl_enabled: bool) -> Self {
		self.ssl_enabled = ssl_enabled;

		self
	}

	/// Returns the URL scheme implied by [`ClientConfig::ssl_enabled`].
	pub fn scheme(&self) -> &'static str {
		if self.ssl_enabled { "https" } else { "http" }
	}

	/// Returns `scheme://api_host/`.
	pub fn base_url(&self) -> String {
		format!("{}://{}/", self.scheme(), self.api_host)
	}

	/// Appends `uri` verbatim to [`ClientConfig::base_url`] and validates the result.
	pub fn endpoint(&self, uri: &str) -> Result<Url> {
		let raw = format!("{}{uri}", self.base_url());

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source }.into())
	}

	fn default_api_version() -> String {
		Self::DEFAULT_API_VERSION.into()
	}

	fn default_ssl_enabled() -> bool {
		true
	}
}
