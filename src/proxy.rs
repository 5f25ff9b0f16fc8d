//! The call chain: client-credentials token, destination lookup, proxied request.
//!
//! [`DestinationProxy::call`] validates [`CallOptions`] and runs the three steps in order.
//! Each step is also exposed on its own, both as a lookup-by-instance variant that resolves the
//! binding through the injected [`BindingProvider`] and as a variant taking an explicit
//! [`ServiceBinding`](crate::binding::ServiceBinding).

mod common;
mod forward;
mod lookup;
mod token;

pub use forward::*;

// self
use crate::{
	_prelude::*,
	binding::BindingProvider,
	http::{ProxyHttpClient, TransportErrorMapper},
	options::CallOptions,
};
#[cfg(feature = "reqwest")]
use crate::{
	binding::EnvBindings,
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
};

#[cfg(feature = "reqwest")]
/// Proxy specialized for the crate's default reqwest transport stack.
pub type ReqwestDestinationProxy =
	DestinationProxy<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Resolves destinations through a bound destination service and forwards calls to them.
///
/// The proxy holds no mutable state: every call fetches a fresh token and a fresh destination.
/// Clones share the transport, mapper and binding provider.
pub struct DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Source of service binding credentials.
	pub bindings: Arc<dyn BindingProvider>,
}
impl<C, M> DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a proxy that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		bindings: Arc<dyn BindingProvider>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), bindings }
	}

	/// Validates `options`, then fetches a token, resolves the destination and forwards the
	/// request.
	///
	/// Validation failures return before any request is issued. The proxied response is
	/// returned whatever its status.
	pub async fn call(&self, options: CallOptions) -> Result<DestinationResponse> {
		options.validate()?;

		let CallOptions { url, destination_instance, destination_name, http_method, payload } =
			options;
		let token = self.fetch_token(&destination_instance).await?;
		let destination =
			self.fetch_destination(&token, &destination_instance, &destination_name).await?;
		let mut call = DestinationCall::new(&destination, http_method);

		if let Some(url) = url.as_deref() {
			call = call.with_url(url);
		}
		if let Some(payload) = payload.as_ref() {
			call = call.with_payload(payload);
		}

		self.call_destination(call).await
	}
}
#[cfg(feature = "reqwest")]
impl DestinationProxy<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a proxy backed by a default reqwest transport.
	pub fn new(bindings: Arc<dyn BindingProvider>) -> Self {
		Self::with_http_client(
			bindings,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}

	/// Creates a proxy that reads bindings from `VCAP_SERVICES` on every lookup.
	pub fn from_env() -> Self {
		Self::new(Arc::new(EnvBindings))
	}
}
impl<C, M> Clone for DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			bindings: Arc::clone(&self.bindings),
		}
	}
}
impl<C, M> Debug for DestinationProxy<C, M>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DestinationProxy").finish_non_exhaustive()
	}
}
