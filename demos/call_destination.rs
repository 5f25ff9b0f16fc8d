//! Demonstrates the full call chain against mocked endpoints: client-credentials token,
//! destination lookup, then a proxied POST carrying a JSON payload.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use destination_proxy::{
	binding::{ServiceBinding, StaticBindings},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	options::{CallOptions, HttpMethod},
	proxy::ReqwestDestinationProxy,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"bearer\"}");
		})
		.await;
	let destination = json!({
		"owner": { "SubaccountId": "demo-subaccount", "InstanceId": null },
		"destinationConfiguration": {
			"Name": "orders-api",
			"Type": "HTTP",
			"URL": server.url("/orders-service"),
			"Authentication": "OAuth2ClientCredentials",
			"ProxyType": "Internet"
		},
		"authTokens": [{ "type": "Bearer", "value": "orders-access" }]
	});
	let destination_mock = server
		.mock_async(move |when, then| {
			when.method(GET)
				.path("/destination-configuration/v1/destinations/orders-api")
				.header("authorization", "Bearer demo-access");
			then.status(200).json_body(destination);
		})
		.await;
	let orders_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/orders-service/v1/orders")
				.header("authorization", "Bearer orders-access");
			then.status(201).body("{\"id\":\"ORD-1\"}");
		})
		.await;
	let binding = ServiceBinding::builder()
		.url(server.base_url())
		.uri(server.base_url())
		.client_id("demo-client")
		.client_secret("super-secret")
		.build()?;
	let bindings = StaticBindings::default().with_binding("demo-destination", binding);
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let proxy = ReqwestDestinationProxy::with_http_client(
		Arc::new(bindings),
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	);
	let options = CallOptions::new(HttpMethod::Post, "demo-destination", "orders-api")
		.with_url("/v1/orders")
		.with_payload(json!({ "item": "widget", "quantity": 3 }));
	let response = proxy.call(options).await?;

	token_mock.assert_async().await;
	destination_mock.assert_async().await;
	orders_mock.assert_async().await;

	println!("Destination responded with {}: {}", response.status, response.text());

	Ok(())
}
