//! Destination records returned by the destination-configuration service.

// crates.io
use oauth2::AccessToken;
use serde_json::Value;
// self
use crate::_prelude::*;

/// A named, centrally configured target system.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
	/// Subaccount or service instance that owns the destination.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner: Option<DestinationOwner>,
	/// Target configuration (URL, authentication type, extra properties).
	pub destination_configuration: DestinationConfiguration,
	/// Tokens minted by the service for the destination's authentication type.
	#[serde(default)]
	pub auth_tokens: Vec<AuthToken>,
}
impl Destination {
	/// Token used to authorize the proxied call: the first entry of `authTokens`.
	pub fn auth_token(&self) -> Option<&AuthToken> {
		self.auth_tokens.first()
	}

	/// Target base URL.
	pub fn url(&self) -> &str {
		&self.destination_configuration.url
	}
}

/// Owner of a destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationOwner {
	/// Owning subaccount.
	#[serde(rename = "SubaccountId", default)]
	pub subaccount_id: Option<String>,
	/// Owning service instance, for instance-level destinations.
	#[serde(rename = "InstanceId", default)]
	pub instance_id: Option<String>,
}

/// Destination configuration properties.
///
/// Well-known properties are typed; every other property is kept verbatim in `properties`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DestinationConfiguration {
	/// Destination name.
	#[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Destination type, e.g. `HTTP`.
	#[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Target base URL.
	#[serde(rename = "URL")]
	pub url: String,
	/// Authentication type, e.g. `OAuth2ClientCredentials`.
	#[serde(rename = "Authentication", default, skip_serializing_if = "Option::is_none")]
	pub authentication: Option<String>,
	/// Proxy type, e.g. `Internet` or `OnPremise`.
	#[serde(rename = "ProxyType", default, skip_serializing_if = "Option::is_none")]
	pub proxy_type: Option<String>,
	/// Remaining properties.
	#[serde(flatten)]
	pub properties: BTreeMap<String, Value>,
}

/// Token minted by the destination service.
///
/// Token values are [`AccessToken`]s, so `Debug` output never shows them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthToken {
	/// Token type, used as the `Authorization` scheme (e.g. `Bearer`, `Basic`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Token value.
	pub value: AccessToken,
	/// Ready-made header the service suggests for the token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http_header: Option<AuthHeader>,
	/// Error reported by the service while minting the token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl AuthToken {
	/// `Authorization` header value: `{type} {value}`.
	pub fn authorization(&self) -> AccessToken {
		AccessToken::new(format!("{} {}", self.kind, self.value.secret()))
	}
}

/// Header name/value pair attached to an [`AuthToken`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthHeader {
	/// Header name.
	pub key: String,
	/// Header value.
	pub value: AccessToken,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const DESTINATION: &str = r#"{
		"owner": { "SubaccountId": "sub-1", "InstanceId": null },
		"destinationConfiguration": {
			"Name": "orders-api",
			"Type": "HTTP",
			"URL": "https://api.example.com",
			"Authentication": "OAuth2ClientCredentials",
			"ProxyType": "Internet",
			"tokenServiceURL": "https://auth.example.com/oauth/token"
		},
		"authTokens": [
			{
				"type": "Bearer",
				"value": "abc",
				"http_header": { "key": "Authorization", "value": "Bearer abc" }
			}
		]
	}"#;

	#[test]
	fn parses_known_and_extra_properties() {
		let destination: Destination =
			serde_json::from_str(DESTINATION).expect("Destination fixture should parse.");
		let config = &destination.destination_configuration;

		assert_eq!(destination.url(), "https://api.example.com");
		assert_eq!(config.name.as_deref(), Some("orders-api"));
		assert_eq!(config.proxy_type.as_deref(), Some("Internet"));
		assert_eq!(
			config.properties.get("tokenServiceURL"),
			Some(&Value::from("https://auth.example.com/oauth/token"))
		);
		assert_eq!(
			destination.owner.and_then(|owner| owner.subaccount_id).as_deref(),
			Some("sub-1")
		);
	}

	#[test]
	fn first_auth_token_builds_authorization() {
		let destination: Destination =
			serde_json::from_str(DESTINATION).expect("Destination fixture should parse.");
		let token = destination.auth_token().expect("Fixture carries an auth token.");

		assert_eq!(token.authorization().secret(), "Bearer abc");
		assert_eq!(format!("{token:?}").matches("abc").count(), 0);
	}

	#[test]
	fn auth_tokens_default_to_empty() {
		let destination: Destination = serde_json::from_str(
			r#"{"destinationConfiguration":{"Name":"plain","URL":"https://plain.example.com"}}"#,
		)
		.expect("Destination without tokens should parse.");

		assert!(destination.auth_token().is_none());
		assert!(destination.destination_configuration.properties.is_empty());
	}
}
