//! Cloud Foundry style `VCAP_SERVICES` bindings.
//!
//! The document maps service labels to lists of bound instances, each carrying a
//! `credentials` object. Instances are matched on `name` first, then `instance_name`.

// crates.io
use oauth2::ClientSecret;
// self
use crate::{
	_prelude::*,
	binding::{BindingProvider, ServiceBinding},
	error::ConfigError,
};

/// Environment variable holding the bound-services document.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// Parsed `VCAP_SERVICES` document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct VcapServices {
	services: BTreeMap<String, Vec<VcapInstance>>,
}
impl VcapServices {
	/// Parses a bound-services document.
	pub fn from_json(document: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(document);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::MalformedBindings { source })
	}

	/// Reads and parses `VCAP_SERVICES` from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		let document = std::env::var(VCAP_SERVICES)
			.map_err(|_| ConfigError::MissingEnvironment { var: VCAP_SERVICES })?;

		Self::from_json(&document)
	}

	/// Finds the instance bound under `instance` and validates its credentials.
	pub fn binding(&self, instance: &str) -> Result<ServiceBinding, ConfigError> {
		let entries = || self.services.values().flatten();
		let found = entries()
			.find(|entry| entry.name.as_deref() == Some(instance))
			.or_else(|| entries().find(|entry| entry.instance_name.as_deref() == Some(instance)))
			.ok_or_else(|| ConfigError::BindingNotFound { instance: instance.to_owned() })?;

		found.credentials.to_binding()
	}
}
impl BindingProvider for VcapServices {
	fn resolve(&self, instance: &str) -> Result<ServiceBinding> {
		Ok(self.binding(instance)?)
	}
}

/// [`BindingProvider`] that re-reads `VCAP_SERVICES` on every lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvBindings;
impl BindingProvider for EnvBindings {
	fn resolve(&self, instance: &str) -> Result<ServiceBinding> {
		Ok(VcapServices::from_env()?.binding(instance)?)
	}
}

#[derive(Clone, Debug, Deserialize)]
struct VcapInstance {
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	instance_name: Option<String>,
	credentials: VcapCredentials,
}

#[derive(Clone, Debug, Deserialize)]
struct VcapCredentials {
	#[serde(default)]
	url: Option<String>,
	#[serde(default)]
	uri: Option<String>,
	#[serde(default)]
	clientid: Option<String>,
	#[serde(default)]
	clientsecret: Option<ClientSecret>,
}
impl VcapCredentials {
	fn to_binding(&self) -> Result<ServiceBinding, ConfigError> {
		let mut builder = ServiceBinding::builder();

		builder.url = self.url.clone();
		builder.uri = self.uri.clone();
		builder.client_id = self.clientid.clone();
		builder.client_secret = self.clientsecret.clone();

		builder.build()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const DOCUMENT: &str = r#"{
		"destination": [
			{
				"label": "destination",
				"name": "dest-service",
				"instance_name": "dest-instance",
				"tags": ["destination", "conn", "connsvc"],
				"credentials": {
					"clientid": "sb-clone-1",
					"clientsecret": "top-secret",
					"uri": "https://destination-configuration.example.com",
					"url": "https://tenant.authentication.example.com"
				}
			}
		],
		"xsuaa": [
			{
				"name": "uaa-service",
				"credentials": {
					"clientid": "sb-app",
					"clientsecret": "other-secret",
					"url": "https://tenant.authentication.example.com"
				}
			}
		]
	}"#;

	#[test]
	fn resolves_by_name_or_instance_name() {
		let services = VcapServices::from_json(DOCUMENT).expect("Fixture document should parse.");
		let by_name = services.binding("dest-service").expect("Service name should resolve.");
		let by_instance =
			services.binding("dest-instance").expect("Instance name should resolve.");

		assert_eq!(by_name.client_id.as_str(), "sb-clone-1");
		assert_eq!(by_name.client_secret.secret(), "top-secret");
		assert_eq!(by_name.uri.as_str(), "https://destination-configuration.example.com/");
		assert_eq!(by_instance.url.as_str(), "https://tenant.authentication.example.com/");
	}

	#[test]
	fn missing_instance_and_fields_are_config_errors() {
		let services = VcapServices::from_json(DOCUMENT).expect("Fixture document should parse.");

		assert!(matches!(
			services.binding("unknown"),
			Err(ConfigError::BindingNotFound { instance }) if instance == "unknown"
		));
		assert!(matches!(
			services.binding("uaa-service"),
			Err(ConfigError::MissingBindingField { field: "uri" })
		));
	}

	#[test]
	fn malformed_documents_report_their_path() {
		let document = r#"{"destination":[{"name":"x","credentials":{"url":1}}]}"#;
		let err = VcapServices::from_json(document).expect_err("Numeric url should be rejected.");

		assert_eq!(
			err.to_string(),
			"Service binding document is malformed at `destination[0].credentials.url`."
		);
	}
}
