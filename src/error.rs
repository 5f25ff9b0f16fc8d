//! Crate-wide error types shared by every step of the call chain.

// self
use crate::{_prelude::*, obs::Stage};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Coarse classification of an [`Error`], stable across variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Caller-supplied options were rejected before any I/O.
	Validation,
	/// Local configuration problem (bindings, URLs, HTTP client setup).
	Config,
	/// Network-level failure while talking to an endpoint.
	Transport,
	/// Token or destination endpoint answered with a non-200 status.
	UpstreamStatus,
	/// Token or destination endpoint answered 200 with an unreadable body.
	Decode,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Validation => "validation",
			ErrorKind::Config => "config",
			ErrorKind::Transport => "transport",
			ErrorKind::UpstreamStatus => "upstream-status",
			ErrorKind::Decode => "decode",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller-supplied options are invalid.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, I/O, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token or destination lookup answered with a non-200 status.
	#[error("The {stage} endpoint returned HTTP status {status}.")]
	UpstreamStatus {
		/// Step that observed the status.
		stage: Stage,
		/// HTTP status code returned upstream.
		status: u16,
	},
	/// Successful lookup response could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Classifies the error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::Validation(_) => ErrorKind::Validation,
			Error::Config(_) => ErrorKind::Config,
			Error::Transport(_) => ErrorKind::Transport,
			Error::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
			Error::Decode(_) => ErrorKind::Decode,
		}
	}

	/// Returns the upstream HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Error::UpstreamStatus { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Rejections of caller-supplied call options.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// HTTP method is outside the supported set.
	#[error("HTTP method `{method}` is not supported.")]
	UnsupportedMethod {
		/// Method text supplied by the caller.
		method: String,
	},
	/// Destination service instance name was empty.
	#[error("Destination service instance name must not be empty.")]
	MissingDestinationInstance,
	/// Destination name was empty.
	#[error("Destination name must not be empty.")]
	MissingDestinationName,
}

/// Configuration failures raised while preparing a request.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A header value contains characters HTTP does not allow.
	#[error("The {header} header value contains invalid characters.")]
	InvalidHeader {
		/// Header being populated.
		header: &'static str,
	},
	/// A configured URL cannot be parsed.
	#[error("The {field} URL `{value}` is invalid.")]
	InvalidUrl {
		/// Which URL failed to parse.
		field: &'static str,
		/// Offending value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL cannot act as a base for path segments.
	#[error("The {field} URL `{value}` cannot be used as a base URL.")]
	CannotBeBase {
		/// Which URL failed validation.
		field: &'static str,
		/// Offending value.
		value: String,
	},
	/// Service binding is missing a required field.
	#[error("Service binding is missing the `{field}` field.")]
	MissingBindingField {
		/// Missing field name.
		field: &'static str,
	},
	/// No binding exists for the requested instance.
	#[error("No service binding found for instance `{instance}`.")]
	BindingNotFound {
		/// Requested instance name.
		instance: String,
	},
	/// Binding environment variable is not set.
	#[error("Environment variable `{var}` is not set.")]
	MissingEnvironment {
		/// Variable name.
		var: &'static str,
	},
	/// Binding document could not be parsed.
	#[error("Service binding document is malformed at `{}`.", .source.path())]
	MalformedBindings {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Request payload could not be serialized.
	#[error("Request payload could not be serialized.")]
	PayloadEncode(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the {stage} step.")]
	Network {
		/// Step that issued the request.
		stage: Stage,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete before the configured timeout.
	#[error("Request timed out during the {stage} step.")]
	Timeout {
		/// Step that issued the request.
		stage: Stage,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during the {stage} step.")]
	Io {
		/// Step that issued the request.
		stage: Stage,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// HTTP client failed without a structured cause.
	#[error("HTTP client error occurred during the {stage} step: {message}.")]
	Other {
		/// Step that issued the request.
		stage: Stage,
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(stage: Stage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { stage, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(stage: Stage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { stage, source: Box::new(src) }
	}

	/// Step during which the failure happened.
	pub fn stage(&self) -> Stage {
		match self {
			Self::Network { stage, .. }
			| Self::Timeout { stage, .. }
			| Self::Io { stage, .. }
			| Self::Other { stage, .. } => *stage,
		}
	}
}

/// JSON decoding failure on a successful token or destination response.
#[derive(Debug, ThisError)]
#[error("The {stage} endpoint returned malformed JSON at `{}`.", .source.path())]
pub struct DecodeError {
	/// Step whose response failed to decode.
	pub stage: Stage,
	/// Structured parsing failure.
	#[source]
	pub source: JsonPathError,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_status_names_the_code() {
		let err = Error::UpstreamStatus { stage: Stage::Token, status: 401 };

		assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
		assert_eq!(err.status(), Some(401));
		assert_eq!(err.to_string(), "The token endpoint returned HTTP status 401.");
	}

	#[test]
	fn kinds_follow_variants() {
		let validation = Error::from(ValidationError::MissingDestinationName);
		let transport = Error::from(TransportError::Other {
			stage: Stage::Call,
			message: "connection reset".into(),
		});

		assert_eq!(validation.kind().as_str(), "validation");
		assert_eq!(validation.status(), None);
		assert_eq!(transport.kind(), ErrorKind::Transport);
		assert_eq!(
			transport.to_string(),
			"HTTP client error occurred during the call step: connection reset."
		);
	}

	#[test]
	fn decode_error_reports_json_path() {
		let mut de = serde_json::Deserializer::from_str("{\"access_token\":7}");
		let source = serde_path_to_error::deserialize::<_, HashMap<String, String>>(&mut de)
			.expect_err("Numeric token should fail to decode as a string.");
		let err = Error::from(DecodeError { stage: Stage::Token, source });

		assert_eq!(err.kind(), ErrorKind::Decode);
		assert_eq!(
			err.to_string(),
			"The token endpoint returned malformed JSON at `access_token`."
		);
	}
}
