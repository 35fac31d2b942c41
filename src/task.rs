use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;

use crate::error::Busy;

/// A single-slot holder for one asynchronous operation.
///
/// While the slot is occupied the operation counts as in flight and
/// [`InFlight::start`] refuses a second one. The owner polls once per frame on
/// the UI thread; the UI repaints while [`InFlight::is_busy`] is true.
pub struct InFlight<T> {
    future: Option<LocalBoxFuture<'static, T>>,
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self { future: None }
    }
}

impl<T> std::fmt::Debug for InFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlight")
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl<T> InFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.future.is_some()
    }

    /// Occupy the slot with `future`, or fail if something is already running
    pub fn start(&mut self, future: LocalBoxFuture<'static, T>) -> Result<(), Busy> {
        if self.is_busy() {
            return Err(Busy);
        }
        self.future = Some(future);
        Ok(())
    }

    /// Drive the operation once. Returns its output when it completes, which
    /// also frees the slot.
    pub fn poll(&mut self) -> Option<T> {
        let future = self.future.as_mut()?;
        let mut cx = Context::from_waker(noop_waker_ref());
        match future.poll_unpin(&mut cx) {
            Poll::Ready(output) => {
                self.future = None;
                Some(output)
            }
            Poll::Pending => None,
        }
    }
}
