//! Client-credentials token exchange against the destination service's OAuth server.
//!
//! No caching: every call performs a fresh exchange.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	AccessToken, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	binding::ServiceBinding,
	error::ConfigError,
	http::{ProxyHttpClient, TransportErrorMapper},
	obs::{self, Stage},
	proxy::{DestinationProxy, common},
};

const GRANT_TYPE: &str = "client_credentials";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Deserialize)]
struct TokenResponse {
	access_token: AccessToken,
}

impl<C, M> DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Resolves the binding for `instance` and exchanges its credentials for a token.
	pub async fn fetch_token(&self, instance: &str) -> Result<AccessToken> {
		let binding = self.bindings.resolve(instance)?;

		obs::observe(Stage::Token, instance, self.request_token(&binding)).await
	}

	/// Exchanges `binding`'s client credentials for a token.
	pub async fn exchange_token(&self, binding: &ServiceBinding) -> Result<AccessToken> {
		obs::observe(Stage::Token, binding.client_id.as_str(), self.request_token(binding)).await
	}

	async fn request_token(&self, binding: &ServiceBinding) -> Result<AccessToken> {
		let request = token_request(binding)?;
		let response = common::dispatch(self, Stage::Token, request).await?;
		let body: TokenResponse = common::expect_json(Stage::Token, response)?;

		Ok(body.access_token)
	}
}

fn token_request(binding: &ServiceBinding) -> Result<HttpRequest, ConfigError> {
	let endpoint = binding.token_endpoint()?;
	let client_id = binding.client_id.as_str();
	let credentials = STANDARD.encode(format!("{client_id}:{}", binding.client_secret.secret()));
	let authorization = common::header_value("Authorization", format!("Basic {credentials}"))?;
	let form = form_urlencoded::Serializer::new(String::new())
		.append_pair("client_id", client_id)
		.append_pair("grant_type", GRANT_TYPE)
		.finish();

	Ok(Request::builder()
		.method(Method::POST)
		.uri(endpoint.as_str())
		.header(AUTHORIZATION, authorization)
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.body(form.into_bytes())?)
}
