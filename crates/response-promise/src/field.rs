//! Field projections used by the [`ResponsePromise`](crate::ResponsePromise) accessors.
//!
//! Every projection walks the response one optional step at a time: a missing
//! response, status or header map ends the walk with `None`.

use crate::callback::{Callback, Handlers};
use crate::header::{HeaderValues, Headers, normalize_header_name};
use crate::response::{IntoResponse, Response};
use tracing::trace;

/// Extracts one part of a settled response.
pub trait Field<E> {
    type Value;

    fn extract(&self, response: Option<Response<E>>) -> Option<Self::Value>;
}

/// Projects `response.entity`.
#[derive(Default, Clone, Copy, Debug)]
pub struct Entity;

impl<E> Field<E> for Entity {
    type Value = E;

    fn extract(&self, response: Option<Response<E>>) -> Option<E> {
        let Some(response) = response else {
            trace!(field = "entity", "settled without a response");
            return None;
        };
        response.entity
    }
}

/// Projects `response.status.code`.
#[derive(Default, Clone, Copy, Debug)]
pub struct StatusCode;

impl<E> Field<E> for StatusCode {
    type Value = u16;

    fn extract(&self, response: Option<Response<E>>) -> Option<u16> {
        let Some(response) = response else {
            trace!(field = "status", "settled without a response");
            return None;
        };
        let Some(status) = response.status else {
            trace!(field = "status", "response has no status");
            return None;
        };
        Some(status.code)
    }
}

/// Projects `response.headers`.
#[derive(Default, Clone, Copy, Debug)]
pub struct AllHeaders;

impl<E> Field<E> for AllHeaders {
    type Value = Headers;

    fn extract(&self, response: Option<Response<E>>) -> Option<Headers> {
        let Some(response) = response else {
            trace!(field = "headers", "settled without a response");
            return None;
        };
        response.headers
    }
}

/// Projects `response.headers[name]`, the name being normalized once on creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    name: String,
}

impl Header {
    pub fn new(name: &str) -> Self {
        Self { name: normalize_header_name(name) }
    }

    /// The normalized header name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<E> Field<E> for Header {
    type Value = HeaderValues;

    fn extract(&self, response: Option<Response<E>>) -> Option<HeaderValues> {
        let Some(response) = response else {
            trace!(field = "header", header = %self.name, "settled without a response");
            return None;
        };
        let Some(mut headers) = response.headers else {
            trace!(field = "header", header = %self.name, "response has no headers");
            return None;
        };
        headers.remove_normalized(&self.name)
    }
}

/// A callback that first projects a [`Field`] out of the settled value.
#[derive(Clone, Copy, Debug)]
pub struct Select<P, C> {
    field: P,
    callback: C,
}

impl<P, C> Select<P, C> {
    pub fn new(field: P, callback: C) -> Self {
        Self { field, callback }
    }
}

impl<In, Out, P, C> Callback<In, Out> for Select<P, C>
where
    In: IntoResponse,
    P: Field<In::Entity>,
    C: Callback<Option<P::Value>, Out>,
{
    fn call(self, value: In) -> Out {
        let extracted = self.field.extract(value.into_response());
        self.callback.call(extracted)
    }
}

impl<OnF, OnR> Handlers<OnF, OnR> {
    /// Puts the projection of `field` in front of both slots.
    pub(crate) fn select<P: Clone>(self, field: P) -> Handlers<Select<P, OnF>, Select<P, OnR>> {
        let rejected_field = field.clone();
        self.map(
            |on_fulfilled| Select::new(field, on_fulfilled),
            |on_rejected| Select::new(rejected_field, on_rejected),
        )
    }
}
