//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use destination_proxy::{
	binding::{ServiceBinding, StaticBindings},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	proxy::DestinationProxy,
	reqwest::Client,
};

/// Proxy type alias used by reqwest-backed integration tests.
pub type ReqwestTestProxy = DestinationProxy<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Instance name every test binding is registered under.
pub const INSTANCE: &str = "dest-service";
/// Client identifier bound to every test binding.
pub const CLIENT_ID: &str = "sb-destination-client";
/// Client secret bound to every test binding.
pub const CLIENT_SECRET: &str = "destination-secret";
/// `Authorization` header the token endpoint expects: `base64(CLIENT_ID:CLIENT_SECRET)`.
pub const BASIC_AUTHORIZATION: &str = "Basic c2ItZGVzdGluYXRpb24tY2xpZW50OmRlc3RpbmF0aW9uLXNlY3JldA==";
/// Form body the token endpoint expects.
pub const TOKEN_FORM: &str = "client_id=sb-destination-client&grant_type=client_credentials";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Builds a binding whose OAuth and destination-configuration bases both point at `base`.
pub fn test_binding(base: &str) -> ServiceBinding {
	ServiceBinding::builder()
		.url(base)
		.uri(base)
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.build()
		.expect("Test service binding should build successfully.")
}

/// Constructs a proxy that resolves [`INSTANCE`] to a binding rooted at `base`.
pub fn build_reqwest_test_proxy(base: &str) -> ReqwestTestProxy {
	let bindings = StaticBindings::default().with_binding(INSTANCE, test_binding(base));

	DestinationProxy::with_http_client(
		Arc::new(bindings),
		test_reqwest_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	)
}

/// Destination document pointing at `url` with a single bearer token `abc`.
pub fn destination_body(name: &str, url: &str) -> String {
	format!(
		"{{\"owner\":{{\"SubaccountId\":\"sub-1\",\"InstanceId\":null}},\
		\"destinationConfiguration\":{{\"Name\":\"{name}\",\"Type\":\"HTTP\",\"URL\":\"{url}\",\
		\"Authentication\":\"OAuth2ClientCredentials\",\"ProxyType\":\"Internet\"}},\
		\"authTokens\":[{{\"type\":\"Bearer\",\"value\":\"abc\",\"expires_in\":\"3600\"}}]}}"
	)
}
