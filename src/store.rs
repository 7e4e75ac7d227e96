//! Storage contracts and built-in store implementations for access tokens.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::AccessToken};

/// Future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the client's current access token pair.
///
/// A store holds at most one pair; each [`save`](TokenStore::save) replaces the previous one.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Persists `token`, replacing whatever was stored before.
	fn save(&self, token: AccessToken) -> StoreFuture<'_, ()>;

	/// Returns the stored token pair, if one has been saved.
	fn get(&self) -> StoreFuture<'_, Option<AccessToken>>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
