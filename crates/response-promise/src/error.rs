use http::header::{InvalidHeaderName, InvalidHeaderValue};
use http::status::InvalidStatusCode;
use std::error::Error;
use thiserror::Error;

/// Error carried by a transport failure that produced no response at all.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Failure to turn a [`Response`](crate::Response) back into an `http::Response`.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid status code {code}: {source}")]
    InvalidStatus {
        code: u16,
        #[source]
        source: InvalidStatusCode,
    },

    #[error("invalid header name {name}: {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    #[error("invalid value for header {name}: {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

impl ConvertError {
    pub fn invalid_status(code: u16, source: InvalidStatusCode) -> Self {
        Self::InvalidStatus { code, source }
    }

    pub fn invalid_header_name<S: ToString>(name: S, source: InvalidHeaderName) -> Self {
        Self::InvalidHeaderName { name: name.to_string(), source }
    }

    pub fn invalid_header_value<S: ToString>(name: S, source: InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue { name: name.to_string(), source }
    }
}
