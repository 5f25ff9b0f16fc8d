//! Transport primitives shared by the token, destination and proxied requests.
//!
//! [`ProxyHttpClient`] is the crate's only dependency on an HTTP stack. Requests and
//! responses travel as [`oauth2::HttpRequest`] / [`oauth2::HttpResponse`] (plain
//! `http::Request<Vec<u8>>` / `http::Response<Vec<u8>>`), so any client able to drive an
//! [`AsyncHttpClient`] can back a [`DestinationProxy`](crate::proxy::DestinationProxy).
//! [`TransportErrorMapper`] turns the client's failures into the crate's [`Error`] taxonomy.

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, time::Duration};
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
// self
use crate::{_prelude::*, obs::Stage};
#[cfg(feature = "reqwest")]
use crate::error::{ConfigError, TransportError};

/// Abstraction over HTTP transports able to execute every request of the call chain.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// clones of a proxy. The handles they return own whatever state the request needs, so the
/// request future stays `Send` for the whole in-flight operation.
pub trait ProxyHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle executing a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Returns a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] raised during `stage` into a crate error.
	fn map_transport_error(&self, stage: Stage, error: HttpClientError<E>) -> Error;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that aborts any request running longer than `timeout`.
	///
	/// Without a timeout a stalled endpoint stalls the whole call chain.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHttpClient {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let response =
				self.0.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl ProxyHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHttpClient;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		self.clone()
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, stage: Stage, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(stage, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(source) => TransportError::Io { stage, source }.into(),
			HttpClientError::Other(message) => TransportError::Other { stage, message }.into(),
			_ => TransportError::Other { stage, message: "unrecognized client failure".into() }
				.into(),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(stage: Stage, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(stage, err).into();
	}

	TransportError::network(stage, err).into()
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::error::ErrorKind;

	#[test]
	fn other_client_failures_stay_transport_errors() {
		let err = ReqwestTransportErrorMapper.map_transport_error(
			Stage::Destination,
			HttpClientError::Other("socket closed".into()),
		);

		assert_eq!(err.kind(), ErrorKind::Transport);
		assert_eq!(
			err.to_string(),
			"HTTP client error occurred during the destination step: socket closed."
		);
	}

	#[test]
	fn io_failures_keep_their_stage() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
		let err =
			ReqwestTransportErrorMapper.map_transport_error(Stage::Call, HttpClientError::Io(io));

		match err {
			Error::Transport(inner) => assert_eq!(inner.stage(), Stage::Call),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn timeout_client_builds() {
		let client = ReqwestHttpClient::with_timeout(Duration::from_secs(5));

		assert!(client.is_ok());
	}
}
