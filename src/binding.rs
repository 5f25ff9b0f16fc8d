//! Service binding credentials (data) and the providers that resolve them (behavior).
//!
//! A [`ServiceBinding`] carries the two base URLs and the client credentials of a bound
//! destination service instance. [`BindingProvider`] resolves a binding by instance name;
//! [`StaticBindings`] keeps bindings in memory, [`EnvBindings`] reads the platform's
//! `VCAP_SERVICES` document on every lookup.

pub mod builder;
pub mod memory;
pub mod vcap;

pub use builder::*;
pub use memory::*;
pub use vcap::*;

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{_prelude::*, error::ConfigError};

const TOKEN_PATH: [&str; 2] = ["oauth", "token"];
const DESTINATIONS_PATH: [&str; 3] = ["destination-configuration", "v1", "destinations"];

/// Resolves service binding credentials for a named service instance.
pub trait BindingProvider
where
	Self: Send + Sync,
{
	/// Returns the binding bound under `instance`.
	fn resolve(&self, instance: &str) -> Result<ServiceBinding>;
}

/// Credentials of a bound destination service instance.
#[derive(Clone, Debug)]
pub struct ServiceBinding {
	/// OAuth server base URL; the token endpoint lives at `{url}/oauth/token`.
	pub url: Url,
	/// Destination-configuration service base URL.
	pub uri: Url,
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// OAuth client secret.
	pub client_secret: ClientSecret,
}
impl ServiceBinding {
	/// Creates a new builder.
	pub fn builder() -> ServiceBindingBuilder {
		ServiceBindingBuilder::default()
	}

	/// Client-credentials token endpoint.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		join_segments("url", &self.url, TOKEN_PATH)
	}

	/// Destination-configuration endpoint for `name`; the name is encoded as one path segment.
	pub fn destination_endpoint(&self, name: &str) -> Result<Url, ConfigError> {
		join_segments("uri", &self.uri, DESTINATIONS_PATH.into_iter().chain([name]))
	}
}

fn join_segments<'a, I>(field: &'static str, base: &Url, segments: I) -> Result<Url, ConfigError>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut url = base.clone();

	url.path_segments_mut()
		.map_err(|_| ConfigError::CannotBeBase { field, value: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}
