//! Caller-supplied options for a proxied destination call.

// crates.io
use oauth2::http::Method;
use serde_json::Value;
// self
use crate::{_prelude::*, error::ValidationError};

/// HTTP methods a destination call may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
	/// `HEAD`
	Head,
	/// `OPTIONS`
	Options,
}
impl HttpMethod {
	/// Every supported method.
	pub const ALL: [HttpMethod; 7] = [
		HttpMethod::Get,
		HttpMethod::Post,
		HttpMethod::Put,
		HttpMethod::Patch,
		HttpMethod::Delete,
		HttpMethod::Head,
		HttpMethod::Options,
	];

	/// Upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
			HttpMethod::Head => "HEAD",
			HttpMethod::Options => "OPTIONS",
		}
	}

	/// Whether a payload is sent as the request body for this method.
	pub const fn carries_payload(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
	}

	/// Equivalent [`Method`] for request builders.
	pub fn to_http(self) -> Method {
		match self {
			HttpMethod::Get => Method::GET,
			HttpMethod::Post => Method::POST,
			HttpMethod::Put => Method::PUT,
			HttpMethod::Patch => Method::PATCH,
			HttpMethod::Delete => Method::DELETE,
			HttpMethod::Head => Method::HEAD,
			HttpMethod::Options => Method::OPTIONS,
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|method| method.as_str() == s)
			.ok_or_else(|| ValidationError::UnsupportedMethod { method: s.to_owned() })
	}
}
impl TryFrom<String> for HttpMethod {
	type Error = ValidationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<HttpMethod> for String {
	fn from(value: HttpMethod) -> Self {
		value.as_str().to_owned()
	}
}

/// Options for [`DestinationProxy::call`](crate::proxy::DestinationProxy::call).
///
/// Serializes with the camelCase field names callers exchange over the wire
/// (`destinationInstance`, `destinationName`, `httpMethod`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOptions {
	/// Path (and query) appended verbatim to the destination URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Destination service instance whose binding authenticates the lookup.
	pub destination_instance: String,
	/// Destination to resolve.
	pub destination_name: String,
	/// Method of the proxied request.
	pub http_method: HttpMethod,
	/// JSON body for POST, PUT and PATCH requests.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<Value>,
}
impl CallOptions {
	/// Creates options without a path or payload.
	pub fn new(
		http_method: HttpMethod,
		destination_instance: impl Into<String>,
		destination_name: impl Into<String>,
	) -> Self {
		Self {
			url: None,
			destination_instance: destination_instance.into(),
			destination_name: destination_name.into(),
			http_method,
			payload: None,
		}
	}

	/// Sets the path appended to the destination URL.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Sets the JSON payload.
	pub fn with_payload(mut self, payload: Value) -> Self {
		self.payload = Some(payload);

		self
	}

	/// Checks the instance and destination names.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.destination_instance.is_empty() {
			return Err(ValidationError::MissingDestinationInstance);
		}
		if self.destination_name.is_empty() {
			return Err(ValidationError::MissingDestinationName);
		}

		Ok(())
	}
}
