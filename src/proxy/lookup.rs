//! Destination lookup against the destination-configuration service.

// crates.io
use oauth2::{
	AccessToken, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	binding::ServiceBinding,
	destination::Destination,
	error::ConfigError,
	http::{ProxyHttpClient, TransportErrorMapper},
	obs::{self, Stage},
	proxy::{DestinationProxy, common},
};

impl<C, M> DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Resolves the binding for `instance` again and looks up destination `name` with `token`.
	pub async fn fetch_destination(
		&self,
		token: &AccessToken,
		instance: &str,
		name: &str,
	) -> Result<Destination> {
		let binding = self.bindings.resolve(instance)?;

		self.lookup_destination(&binding, token, name).await
	}

	/// Looks up destination `name` on `binding`'s destination-configuration service.
	pub async fn lookup_destination(
		&self,
		binding: &ServiceBinding,
		token: &AccessToken,
		name: &str,
	) -> Result<Destination> {
		obs::observe(Stage::Destination, name, self.request_destination(binding, token, name)).await
	}

	async fn request_destination(
		&self,
		binding: &ServiceBinding,
		token: &AccessToken,
		name: &str,
	) -> Result<Destination> {
		let request = destination_request(binding, token, name)?;
		let response = common::dispatch(self, Stage::Destination, request).await?;

		common::expect_json(Stage::Destination, response)
	}
}

fn destination_request(
	binding: &ServiceBinding,
	token: &AccessToken,
	name: &str,
) -> Result<HttpRequest, ConfigError> {
	let endpoint = binding.destination_endpoint(name)?;
	let authorization =
		common::header_value("Authorization", format!("Bearer {}", token.secret()))?;

	Ok(Request::builder()
		.method(Method::GET)
		.uri(endpoint.as_str())
		.header(AUTHORIZATION, authorization)
		.header(ACCEPT, "application/json")
		.body(Vec::new())?)
}
