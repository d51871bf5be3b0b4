//! The http-style response carried by a [`ResponsePromise`](crate::ResponsePromise).
//!
//! Every part of a [`Response`] is optional: transports may settle with a partial
//! response (a rejection carrying only an entity, a synthetic response without
//! headers, ...) and extraction degrades to `None` instead of failing.

use crate::error::{BoxError, ConvertError};
use crate::header::Headers;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use std::error::Error;
use std::sync::Arc;
use tracing::warn;

/// Status line of a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub text: Option<String>,
}

impl Status {
    pub fn new(code: u16) -> Self {
        Self { code, text: None }
    }

    pub fn with_text<S: Into<String>>(code: u16, text: S) -> Self {
        Self { code, text: Some(text.into()) }
    }
}

impl From<http::StatusCode> for Status {
    fn from(status: http::StatusCode) -> Self {
        Self { code: status.as_u16(), text: status.canonical_reason().map(str::to_owned) }
    }
}

/// An http-style response with an entity (body) of type `E`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<E = Bytes> {
    pub entity: Option<E>,
    pub status: Option<Status>,
    pub headers: Option<Headers>,
}

impl<E> Default for Response<E> {
    fn default() -> Self {
        Self { entity: None, status: None, headers: None }
    }
}

impl<E> Response<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: E) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_status(mut self, code: u16) -> Self {
        self.status = Some(Status::new(code));
        self
    }

    pub fn with_status_text<S: Into<String>>(mut self, code: u16, text: S) -> Self {
        self.status = Some(Status::with_text(code, text));
        self
    }

    /// Adds a header value, creating the header map on first use.
    pub fn with_header<V: Into<String>>(mut self, name: &str, value: V) -> Self {
        self.headers.get_or_insert_with(Headers::new).insert(name, value);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// The numeric status code, if a status is present.
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_ref().map(|status| status.code)
    }
}

impl<B> From<http::Response<B>> for Response<B> {
    fn from(response: http::Response<B>) -> Self {
        let (parts, body) = response.into_parts();

        Response {
            entity: Some(body),
            status: Some(Status::from(parts.status)),
            headers: Some(Headers::from(&parts.headers)),
        }
    }
}

/// Rebuilds an `http::Response`. A missing entity becomes `B::default()` and a
/// missing status stays `200 OK`; the status text is not carried over.
impl<B: Default> TryFrom<Response<B>> for http::Response<B> {
    type Error = ConvertError;

    fn try_from(response: Response<B>) -> Result<Self, Self::Error> {
        let mut http_response = http::Response::new(response.entity.unwrap_or_default());

        if let Some(status) = response.status {
            *http_response.status_mut() = http::StatusCode::from_u16(status.code).map_err(|e| {
                warn!(code = status.code, "status code out of range");
                ConvertError::invalid_status(status.code, e)
            })?;
        }

        let Some(headers) = response.headers else {
            return Ok(http_response);
        };

        let header_map = http_response.headers_mut();
        for (name, values) in headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                warn!(header = name, "invalid header name");
                ConvertError::invalid_header_name(name, e)
            })?;

            for value in values.iter() {
                let header_value = HeaderValue::from_str(value).map_err(|e| {
                    warn!(header = name, "invalid header value");
                    ConvertError::invalid_header_value(name, e)
                })?;
                header_map.append(header_name.clone(), header_value);
            }
        }

        Ok(http_response)
    }
}

/// A settlement value that may or may not hold a [`Response`].
///
/// Both the fulfilled and the rejected value of a response future implement this
/// trait; accessors project the wanted field out of whatever response is there.
pub trait IntoResponse {
    type Entity;

    fn into_response(self) -> Option<Response<Self::Entity>>;
}

impl<E> IntoResponse for Response<E> {
    type Entity = E;

    #[inline]
    fn into_response(self) -> Option<Response<E>> {
        Some(self)
    }
}

impl<E> IntoResponse for Option<Response<E>> {
    type Entity = E;

    #[inline]
    fn into_response(self) -> Option<Response<E>> {
        self
    }
}

/// Rejection reason of a transport that fails either with a response or before
/// any response exists.
///
/// Cloneable when `E` is, so it can settle a [`shared`](crate::ResponsePromise::shared) promise.
#[derive(Debug, Clone)]
pub enum Failure<E = Bytes> {
    /// The exchange completed but is reported as a failure, e.g. an error status.
    Response(Response<E>),
    /// No response was received.
    Transport(Arc<dyn Error + Send + Sync>),
}

impl<E> Failure<E> {
    pub fn transport<Err: Into<BoxError>>(err: Err) -> Self {
        Failure::Transport(Arc::from(err.into()))
    }
}

impl<E> From<Response<E>> for Failure<E> {
    fn from(response: Response<E>) -> Self {
        Failure::Response(response)
    }
}

impl<E> IntoResponse for Failure<E> {
    type Entity = E;

    fn into_response(self) -> Option<Response<E>> {
        match self {
            Failure::Response(response) => Some(response),
            Failure::Transport(_) => None,
        }
    }
}
