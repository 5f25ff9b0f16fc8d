//! Validating builder for [`ServiceBinding`] values.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{_prelude::*, binding::ServiceBinding, error::ConfigError};

/// Builder for [`ServiceBinding`] values.
#[derive(Debug, Default)]
pub struct ServiceBindingBuilder {
	/// OAuth server base URL.
	pub url: Option<String>,
	/// Destination-configuration service base URL.
	pub uri: Option<String>,
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<ClientSecret>,
}
impl ServiceBindingBuilder {
	/// Sets the OAuth server base URL.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Sets the destination-configuration service base URL.
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());

		self
	}

	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(ClientSecret::new(client_secret.into()));

		self
	}

	/// Consumes the builder and validates the resulting binding.
	pub fn build(self) -> Result<ServiceBinding, ConfigError> {
		let url = parse_base("url", self.url)?;
		let uri = parse_base("uri", self.uri)?;
		let client_id = self
			.client_id
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingBindingField { field: "clientid" })?;
		let client_secret =
			self.client_secret.ok_or(ConfigError::MissingBindingField { field: "clientsecret" })?;

		Ok(ServiceBinding { url, uri, client_id: ClientId::new(client_id), client_secret })
	}
}

fn parse_base(field: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
	let value = value.ok_or(ConfigError::MissingBindingField { field })?;
	let url = Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
		field,
		value: value.clone(),
		source,
	})?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeBase { field, value });
	}

	Ok(url)
}
