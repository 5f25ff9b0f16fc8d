//! Resolve platform destinations through a bound destination service and proxy HTTP calls
//! through them: client-credentials token, destination lookup, forwarded request.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod binding;
pub mod destination;
pub mod error;
pub mod http;
pub mod obs;
pub mod options;
pub mod proxy;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
