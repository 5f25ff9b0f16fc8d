//! Proxied request against a resolved destination.
//!
//! The response is handed back whatever its status; only transport failures are errors here.

// crates.io
use oauth2::{
	HttpRequest, HttpResponse,
	http::{
		HeaderMap, Request, StatusCode,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	destination::Destination,
	error::ConfigError,
	http::{ProxyHttpClient, TransportErrorMapper},
	obs::{self, Stage},
	options::HttpMethod,
	proxy::{DestinationProxy, common},
};

/// A single request to forward through a destination.
#[derive(Clone, Copy, Debug)]
pub struct DestinationCall<'a> {
	/// Path (and query) appended verbatim to the destination URL.
	pub url: Option<&'a str>,
	/// Resolved destination.
	pub destination: &'a Destination,
	/// Request method.
	pub http_method: HttpMethod,
	/// JSON payload, sent only for POST, PUT and PATCH.
	pub payload: Option<&'a Value>,
}
impl<'a> DestinationCall<'a> {
	/// Creates a call against the destination's base URL without a payload.
	pub fn new(destination: &'a Destination, http_method: HttpMethod) -> Self {
		Self { url: None, destination, http_method, payload: None }
	}

	/// Sets the path appended to the destination URL.
	pub fn with_url(mut self, url: &'a str) -> Self {
		self.url = Some(url);

		self
	}

	/// Sets the JSON payload.
	pub fn with_payload(mut self, payload: &'a Value) -> Self {
		self.payload = Some(payload);

		self
	}

	/// Full target: destination URL followed by the call's path.
	pub fn target(&self) -> String {
		format!("{}{}", self.destination.url(), self.url.unwrap_or_default())
	}

	/// Payload that goes on the wire, if any.
	pub fn body(&self) -> Option<&'a Value> {
		self.payload.filter(|_| self.http_method.carries_payload())
	}
}

/// Raw response of a proxied call.
#[derive(Clone, Debug)]
pub struct DestinationResponse {
	/// Status returned by the destination.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl DestinationResponse {
	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Consumes the response and returns the raw body.
	pub fn into_body(self) -> Vec<u8> {
		self.body
	}
}
impl From<HttpResponse> for DestinationResponse {
	fn from(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status, headers: parts.headers, body }
	}
}

impl<C, M> DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Forwards `call` to its destination, attaching the destination's first auth token.
	pub async fn call_destination(&self, call: DestinationCall<'_>) -> Result<DestinationResponse> {
		let configuration = &call.destination.destination_configuration;
		let subject = configuration.name.as_deref().unwrap_or(configuration.url.as_str());

		obs::observe(Stage::Call, subject, self.forward(call)).await
	}

	async fn forward(&self, call: DestinationCall<'_>) -> Result<DestinationResponse> {
		let request = call_request(&call)?;
		let response = common::dispatch(self, Stage::Call, request).await?;

		Ok(response.into())
	}
}

fn call_request(call: &DestinationCall) -> Result<HttpRequest, ConfigError> {
	let target = call.target();

	// Absolute-URL check only; `Url` resolves dot segments, so the request carries `target`.
	Url::parse(&target).map_err(|source| ConfigError::InvalidUrl {
		field: "destination",
		value: target.clone(),
		source,
	})?;

	let mut builder = Request::builder().method(call.http_method.to_http()).uri(target.as_str());

	if let Some(token) = call.destination.auth_token() {
		let authorization =
			common::header_value("Authorization", token.authorization().secret())?;

		builder = builder.header(AUTHORIZATION, authorization);
	}

	let body = match call.body() {
		Some(payload) => {
			builder = builder.header(CONTENT_TYPE, "application/json");

			serde_json::to_vec(payload).map_err(ConfigError::PayloadEncode)?
		},
		None => Vec::new(),
	};

	Ok(builder.body(body)?)
}
