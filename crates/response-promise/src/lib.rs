//! Chained field extraction for futures of http responses
//!
//! A transport usually hands out a future of a whole response. Callers that only
//! need the body, the status code or one header end up awaiting the response and
//! then destructuring it. [`ResponsePromise`] wraps such a future and lets the
//! extraction be chained directly:
//!
//! ```
//! use response_promise::{Handlers, Response, ResponsePromiseExt};
//!
//! # futures::executor::block_on(async {
//! let fetch = || async {
//!     Ok::<_, Response<String>>(
//!         Response::new()
//!             .with_entity("{\"id\":1}".to_string())
//!             .with_status(200)
//!             .with_header("Content-Type", "application/json"),
//!     )
//! };
//!
//! let body = fetch().into_response_promise().entity().await;
//! assert_eq!(body, Ok(Some("{\"id\":1}".to_string())));
//!
//! let content_type = fetch().into_response_promise().header("content-type").await;
//! assert_eq!(content_type.unwrap().unwrap(), "application/json");
//!
//! let is_success = fetch()
//!     .into_response_promise()
//!     .status_with(Handlers::new().on_fulfilled(|code: Option<u16>| Ok::<_, Option<u16>>(code == Some(200))))
//!     .await;
//! assert_eq!(is_success, Ok(true));
//! # });
//! ```
//!
//! # Settlement
//!
//! The wrapped future settles with `Ok` (fulfilled) or `Err` (rejected). Both
//! sides carry a value implementing [`IntoResponse`]: a [`Response`], an
//! `Option<Response>` for transports that may settle without one, or a
//! [`Failure`] for transports that fail before any response exists.
//!
//! Awaiting a `ResponsePromise` itself yields the source output unchanged.
//!
//! # Accessors
//!
//! - [`ResponsePromise::entity`]: `response.entity`
//! - [`ResponsePromise::status`]: `response.status.code`
//! - [`ResponsePromise::headers`]: `response.headers`
//! - [`ResponsePromise::header`]: `response.headers[name]`, `name` matched in any casing
//!
//! Each returns a [`Then`] future. By default a fulfilled source fulfills with
//! the extracted field and a rejected source rejects with the extracted field.
//! The `_with` variants take [`Handlers`] whose callbacks receive the extracted
//! field and decide the result instead. A missing response, status or header map
//! is extracted as `None`.
//!
//! Accessors consume the promise. Call [`ResponsePromise::shared`] first to use
//! several accessors on one source.

mod callback;
mod error;
mod field;
mod header;
mod promise;
mod response;

pub use callback::{Callback, Handlers, Passthrough, Propagate};
pub use error::{BoxError, ConvertError};
pub use field::{AllHeaders, Entity, Field, Header, Select, StatusCode};
pub use header::{HeaderValues, Headers, normalize_header_name};
pub use promise::{Extracted, ResponsePromise, ResponsePromiseExt, Then, make_response_promise};
pub use response::{Failure, IntoResponse, Response, Status};
