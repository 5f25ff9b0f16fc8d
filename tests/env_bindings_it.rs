//! Kept in its own binary: it mutates the process environment.

mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use destination_proxy::{
	binding::{EnvBindings, VCAP_SERVICES},
	error::ErrorKind,
	http::ReqwestTransportErrorMapper,
	options::{CallOptions, HttpMethod},
	proxy::DestinationProxy,
};

fn vcap_document(base: &str) -> String {
	format!(
		"{{\"destination\":[{{\"name\":\"{INSTANCE}\",\"credentials\":{{\
		\"clientid\":\"{CLIENT_ID}\",\"clientsecret\":\"{CLIENT_SECRET}\",\
		\"url\":\"{base}\",\"uri\":\"{base}\"}}}}]}}"
	)
}

#[tokio::test]
async fn env_bindings_are_read_on_every_step() {
	let server = MockServer::start_async().await;
	let proxy: ReqwestTestProxy = DestinationProxy::with_http_client(
		Arc::new(EnvBindings),
		test_reqwest_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	);

	// SAFETY: this binary runs a single test, so no other thread reads the environment.
	unsafe { std::env::remove_var(VCAP_SERVICES) };

	let err = proxy
		.call(CallOptions::new(HttpMethod::Get, INSTANCE, "orders-api"))
		.await
		.expect_err("Missing bindings should fail the call.");

	assert_eq!(err.kind(), ErrorKind::Config);
	assert!(err.to_string().contains(VCAP_SERVICES));

	// SAFETY: see above.
	unsafe { std::env::set_var(VCAP_SERVICES, vcap_document(&server.base_url())) };

	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.header("authorization", BASIC_AUTHORIZATION)
				.body(TOKEN_FORM);
			then.status(200).body("{\"access_token\":\"tok123\"}");
		})
		.await;
	let body = destination_body("orders-api", &server.url("/api"));
	let destination = server
		.mock_async(move |when, then| {
			when.method(GET).path("/destination-configuration/v1/destinations/orders-api");
			then.status(200).body(body);
		})
		.await;
	let target = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/health");
			then.status(204);
		})
		.await;
	let response = proxy
		.call(CallOptions::new(HttpMethod::Get, INSTANCE, "orders-api").with_url("/health"))
		.await
		.expect("Chain should succeed once bindings are present.");

	assert_eq!(response.status.as_u16(), 204);

	token.assert_async().await;
	destination.assert_async().await;
	target.assert_async().await;
}
