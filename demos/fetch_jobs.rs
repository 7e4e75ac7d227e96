//! Searches jobs with a stored token, saving a fresh pair to disk when provided.
//!
//! ```sh
//! VNW_API_HOST=api.vietnamworks.com VNW_ACCESS_TOKEN=... cargo run --example fetch_jobs
//! ```

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use vnw_client::{
	auth::AccessToken,
	client::{ResponseBody, RestClient},
	error::Error,
	store::{FileStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let host = env::var("VNW_API_HOST").unwrap_or_else(|_| "api.vietnamworks.com".into());
	let store = Arc::new(FileStore::open(env::temp_dir().join("vnw_client_demo_token.json"))?);

	if let Ok(access) = env::var("VNW_ACCESS_TOKEN") {
		let refresh = env::var("VNW_REFRESH_TOKEN").unwrap_or_default();

		store.save(AccessToken::new(access, refresh)).await?;
	}

	let client = RestClient::new(
		env::var("VNW_API_KEY").unwrap_or_default(),
		env::var("VNW_API_SECRET").unwrap_or_default(),
		host,
	)
	.with_token_store(store);
	let token = client.stored_token().await?.unwrap_or_default();

	match client
		.get("jobs/search", token.token().expose(), [("q", "rust"), ("page", "1")], &[])
		.await
	{
		Ok(envelope) => match envelope.http_response_body {
			ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
			ResponseBody::Raw(text) => println!("{text}"),
			ResponseBody::Empty => println!("The API answered with an empty body."),
		},
		Err(e) if e.is_expired_token() =>
			println!("The stored token expired; mint a new one with its refresh token."),
		Err(Error::MissingEndpoint { message }) => println!("Endpoint missing: {message}"),
		Err(e) => return Err(e.into()),
	}

	Ok(())
}
