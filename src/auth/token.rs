//! Access token pair handed to the client and persisted by token stores.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Bearer token plus the refresh token used to mint a replacement out of band.
///
/// No expiry is tracked here; an expired token is only discovered when the API answers
/// with [`Error::ExpiredToken`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	token: TokenSecret,
	refresh_token: TokenSecret,
}
impl AccessToken {
	/// Pairs a bearer token with its refresh token.
	pub fn new(token: impl Into<TokenSecret>, refresh_token: impl Into<TokenSecret>) -> Self {
		Self { token: token.into(), refresh_token: refresh_token.into() }
	}

	/// Returns the bearer credential.
	pub fn token(&self) -> &TokenSecret {
		&self.token
	}

	/// Replaces the bearer credential.
	pub fn set_token(&mut self, token: impl Into<TokenSecret>) {
		self.token = token.into();
	}

	/// Returns the refresh credential.
	pub fn refresh_token(&self) -> &TokenSecret {
		&self.refresh_token
	}

	/// Replaces the refresh credential.
	pub fn set_refresh_token(&mut self, refresh_token: impl Into<TokenSecret>) {
		self.refresh_token = refresh_token.into();
	}
}
