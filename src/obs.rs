//! Optional observability helpers for API requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `vnw_client.request` with the `method` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `vnw_client_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Request handed to the transport.
	Attempt,
	/// API answered 200.
	Success,
	/// Transport failure or any non-200 classification.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}

	/// Maps a finished call to its terminal outcome.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { RequestOutcome::Success } else { RequestOutcome::Failure }
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
