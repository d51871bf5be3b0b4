//! Settlement callbacks.
//!
//! A [`Callback`] receives the settled value (or the field extracted from it) and
//! decides the result of the derived future: returning `Ok` fulfills it, returning
//! `Err` rejects it. [`Handlers`] holds the two callback slots together with their
//! defaults.

/// Receives a settled value and turns it into the output of a derived future.
///
/// Implemented for every `FnOnce(In) -> Out`, so plain closures can be used as
/// callbacks.
pub trait Callback<In, Out> {
    fn call(self, value: In) -> Out;
}

impl<In, Out, F> Callback<In, Out> for F
where
    F: FnOnce(In) -> Out,
{
    #[inline]
    fn call(self, value: In) -> Out {
        (self)(value)
    }
}

/// Default fulfillment callback, fulfills with the value unchanged.
#[derive(Default, Clone, Copy, Debug)]
pub struct Passthrough;

impl<In, E> Callback<In, Result<In, E>> for Passthrough {
    #[inline(always)]
    fn call(self, value: In) -> Result<In, E> {
        Ok(value)
    }
}

/// Default rejection callback, rejects again with the value it received.
#[derive(Default, Clone, Copy, Debug)]
pub struct Propagate;

impl<In, T> Callback<In, Result<T, In>> for Propagate {
    #[inline(always)]
    fn call(self, value: In) -> Result<T, In> {
        Err(value)
    }
}

/// The two callback slots of a derived future.
///
/// `Handlers::new()` starts with [`Passthrough`] and [`Propagate`]; each slot can
/// be replaced independently.
///
/// # Example
/// ```
/// use response_promise::Handlers;
///
/// let handlers = Handlers::new()
///     .on_rejected(|code: Option<u16>| Ok::<_, ()>(code.or(Some(599))));
/// # let _ = handlers;
/// ```
#[derive(Default, Clone, Copy, Debug)]
pub struct Handlers<OnF = Passthrough, OnR = Propagate> {
    pub(crate) on_fulfilled: OnF,
    pub(crate) on_rejected: OnR,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<OnF, OnR> Handlers<OnF, OnR> {
    /// Replaces the callback invoked when the source fulfills.
    pub fn on_fulfilled<C>(self, on_fulfilled: C) -> Handlers<C, OnR> {
        Handlers { on_fulfilled, on_rejected: self.on_rejected }
    }

    /// Replaces the callback invoked when the source rejects.
    pub fn on_rejected<C>(self, on_rejected: C) -> Handlers<OnF, C> {
        Handlers { on_fulfilled: self.on_fulfilled, on_rejected }
    }

    pub(crate) fn map<G, H, FnF, FnR>(self, map_fulfilled: FnF, map_rejected: FnR) -> Handlers<G, H>
    where
        FnF: FnOnce(OnF) -> G,
        FnR: FnOnce(OnR) -> H,
    {
        Handlers { on_fulfilled: map_fulfilled(self.on_fulfilled), on_rejected: map_rejected(self.on_rejected) }
    }
}
