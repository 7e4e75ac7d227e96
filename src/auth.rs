//! Bearer credentials: the access/refresh token pair and the redacting secret wrapper.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
