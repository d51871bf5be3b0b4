//! [`ResponsePromise`] and the futures derived from it.
//!
//! A `ResponsePromise` wraps a future that settles with `Ok` (fulfilled) or `Err`
//! (rejected), both carrying an [`IntoResponse`] value. Awaiting it yields the
//! source output unchanged; the accessors return a [`Then`] future for a single
//! field of the response instead.
//!
//! # Example
//! ```
//! use response_promise::{Response, ResponsePromiseExt};
//!
//! # futures::executor::block_on(async {
//! let source = async { Ok::<_, Response<&str>>(Response::new().with_entity("hello").with_status(200)) };
//!
//! let entity = source.into_response_promise().entity().await;
//! assert_eq!(entity, Ok(Some("hello")));
//! # });
//! ```

use crate::callback::{Callback, Handlers, Passthrough, Propagate};
use crate::field::{AllHeaders, Entity, Header, Select, StatusCode};
use crate::header::{HeaderValues, Headers};
use crate::response::IntoResponse;
use futures::FutureExt;
use futures::future::{FusedFuture, Shared};
use pin_project_lite::pin_project;
use std::fmt;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tracing::trace;

pin_project! {
    /// A future of a response, with accessors for the parts of the response.
    #[derive(Debug, Clone)]
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct ResponsePromise<F> {
        #[pin]
        source: F,
    }
}

/// Wraps a future of a response as a [`ResponsePromise`].
pub fn make_response_promise<F, T, U>(source: F) -> ResponsePromise<F>
where
    F: Future<Output = Result<T, U>>,
    T: IntoResponse,
    U: IntoResponse,
{
    ResponsePromise::new(source)
}

/// Converts any future of a response into a [`ResponsePromise`].
pub trait ResponsePromiseExt: Future + Sized {
    fn into_response_promise(self) -> ResponsePromise<Self> {
        ResponsePromise { source: self }
    }
}

impl<F, T, U> ResponsePromiseExt for F
where
    F: Future<Output = Result<T, U>>,
    T: IntoResponse,
    U: IntoResponse,
{
}

impl<F> ResponsePromise<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> F {
        self.source
    }
}

impl<F, T, U> ResponsePromise<F>
where
    F: Future<Output = Result<T, U>>,
    T: IntoResponse,
    U: IntoResponse,
{
    /// Makes the promise cloneable, each clone observing the same settlement.
    ///
    /// Use this to call several accessors on one source, the source being driven
    /// to completion only once.
    pub fn shared(self) -> ResponsePromise<Shared<F>>
    where
        T: Clone,
        U: Clone,
    {
        ResponsePromise { source: self.source.shared() }
    }

    /// Registers the two settlement callbacks.
    ///
    /// The returned future resolves to whatever the invoked callback returns.
    pub fn then<OnF, OnR, Out>(self, on_fulfilled: OnF, on_rejected: OnR) -> Then<F, OnF, OnR, Out>
    where
        OnF: Callback<T, Out>,
        OnR: Callback<U, Out>,
    {
        Then::new(self.source, Handlers { on_fulfilled, on_rejected })
    }

    /// The response entity.
    pub fn entity(
        self,
    ) -> Then<F, Select<Entity, Passthrough>, Select<Entity, Propagate>, Extracted<T::Entity, U::Entity>> {
        self.entity_with(Handlers::new())
    }

    /// The response entity, handed to `handlers`.
    pub fn entity_with<OnF, OnR, Out>(
        self,
        handlers: Handlers<OnF, OnR>,
    ) -> Then<F, Select<Entity, OnF>, Select<Entity, OnR>, Out>
    where
        OnF: Callback<Option<T::Entity>, Out>,
        OnR: Callback<Option<U::Entity>, Out>,
    {
        Then::new(self.source, handlers.select(Entity))
    }

    /// The response status code.
    pub fn status(
        self,
    ) -> Then<F, Select<StatusCode, Passthrough>, Select<StatusCode, Propagate>, Extracted<u16, u16>> {
        self.status_with(Handlers::new())
    }

    /// The response status code, handed to `handlers`.
    pub fn status_with<OnF, OnR, Out>(
        self,
        handlers: Handlers<OnF, OnR>,
    ) -> Then<F, Select<StatusCode, OnF>, Select<StatusCode, OnR>, Out>
    where
        OnF: Callback<Option<u16>, Out>,
        OnR: Callback<Option<u16>, Out>,
    {
        Then::new(self.source, handlers.select(StatusCode))
    }

    /// The response headers.
    pub fn headers(
        self,
    ) -> Then<F, Select<AllHeaders, Passthrough>, Select<AllHeaders, Propagate>, Extracted<Headers, Headers>> {
        self.headers_with(Handlers::new())
    }

    /// The response headers, handed to `handlers`.
    pub fn headers_with<OnF, OnR, Out>(
        self,
        handlers: Handlers<OnF, OnR>,
    ) -> Then<F, Select<AllHeaders, OnF>, Select<AllHeaders, OnR>, Out>
    where
        OnF: Callback<Option<Headers>, Out>,
        OnR: Callback<Option<Headers>, Out>,
    {
        Then::new(self.source, handlers.select(AllHeaders))
    }

    /// The value(s) of header `name`, matched in any casing.
    pub fn header(
        self,
        name: &str,
    ) -> Then<F, Select<Header, Passthrough>, Select<Header, Propagate>, Extracted<HeaderValues, HeaderValues>> {
        self.header_with(name, Handlers::new())
    }

    /// The value(s) of header `name`, handed to `handlers`.
    pub fn header_with<OnF, OnR, Out>(
        self,
        name: &str,
        handlers: Handlers<OnF, OnR>,
    ) -> Then<F, Select<Header, OnF>, Select<Header, OnR>, Out>
    where
        OnF: Callback<Option<HeaderValues>, Out>,
        OnR: Callback<Option<HeaderValues>, Out>,
    {
        Then::new(self.source, handlers.select(Header::new(name)))
    }
}

/// Output of an accessor with default handlers: the field on both sides.
pub type Extracted<V, R> = Result<Option<V>, Option<R>>;

impl<F: Future> Future for ResponsePromise<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().source.poll(cx)
    }
}

impl<F: FusedFuture> FusedFuture for ResponsePromise<F> {
    fn is_terminated(&self) -> bool {
        self.source.is_terminated()
    }
}

pin_project! {
    /// Future returned by [`ResponsePromise::then`] and the accessors.
    ///
    /// Invokes exactly one of its callbacks, once, when the source settles.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Then<F, OnF, OnR, Out> {
        #[pin]
        source: F,
        handlers: Option<Handlers<OnF, OnR>>,
        _out: PhantomData<fn() -> Out>,
    }
}

impl<F, OnF, OnR, Out> Then<F, OnF, OnR, Out> {
    fn new(source: F, handlers: Handlers<OnF, OnR>) -> Self {
        Self { source, handlers: Some(handlers), _out: PhantomData }
    }
}

impl<F, OnF, OnR, Out, T, U> Future for Then<F, OnF, OnR, Out>
where
    F: Future<Output = Result<T, U>>,
    OnF: Callback<T, Out>,
    OnR: Callback<U, Out>,
{
    type Output = Out;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Out> {
        let this = self.project();
        if this.handlers.is_none() {
            panic!("`Then` polled after completion");
        }

        let settled = ready!(this.source.poll(cx));
        let Some(Handlers { on_fulfilled, on_rejected }) = this.handlers.take() else {
            unreachable!("handlers are present until settlement");
        };

        match settled {
            Ok(value) => {
                trace!("source fulfilled");
                Poll::Ready(on_fulfilled.call(value))
            }
            Err(reason) => {
                trace!("source rejected");
                Poll::Ready(on_rejected.call(reason))
            }
        }
    }
}

impl<F, OnF, OnR, Out, T, U> FusedFuture for Then<F, OnF, OnR, Out>
where
    F: Future<Output = Result<T, U>>,
    OnF: Callback<T, Out>,
    OnR: Callback<U, Out>,
{
    fn is_terminated(&self) -> bool {
        self.handlers.is_none()
    }
}

impl<F, OnF, OnR, Out> fmt::Debug for Then<F, OnF, OnR, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Then").field("settled", &self.handlers.is_none()).finish_non_exhaustive()
    }
}
