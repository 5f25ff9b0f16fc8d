//! Shared helpers for the individual steps (dispatch, status checks, JSON decoding).

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{HeaderValue, StatusCode},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
	http::{ProxyHttpClient, TransportErrorMapper},
	obs::Stage,
	proxy::DestinationProxy,
};

/// Sends `request` through the proxy's transport, mapping transport failures for `stage`.
pub(crate) async fn dispatch<C, M>(
	proxy: &DestinationProxy<C, M>,
	stage: Stage,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ProxyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let handle = proxy.http_client.handle();

	handle.call(request).await.map_err(|err| proxy.transport_mapper.map_transport_error(stage, err))
}

/// Accepts HTTP 200 only and decodes the body as JSON; the body of any other status is ignored.
pub(crate) fn expect_json<T>(stage: Stage, response: HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();

	if status != StatusCode::OK {
		return Err(Error::UpstreamStatus { stage, status: status.as_u16() });
	}

	let mut de = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError { stage, source }.into())
}

/// Builds a header value, naming `header` when the value holds forbidden characters.
pub(crate) fn header_value(
	header: &'static str,
	value: impl AsRef<str>,
) -> Result<HeaderValue, ConfigError> {
	let mut value =
		HeaderValue::from_str(value.as_ref()).map_err(|_| ConfigError::InvalidHeader { header })?;

	value.set_sensitive(true);

	Ok(value)
}
