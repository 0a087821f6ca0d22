//! Trailing-edge debounce with an explicit timer handle.
//!
//! The platform timer is abstracted as an opaque handle `H` whose `Drop`
//! cancels it (`gloo::timers::callback::Timeout` in the browser). Each call
//! drops the previous handle before arming a new one, so only the last call
//! within a quiet period ever reaches [`Debouncer::take`].

use std::time::Duration;

/// Debounce state owned by the component that uses it.
#[derive(Debug)]
pub struct Debouncer<T, H> {
    wait: Duration,
    args: Option<T>,
    timer: Option<H>,
}

impl<T, H> Debouncer<T, H> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            args: None,
            timer: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Record a call and (re)arm the timer.
    ///
    /// The previous timer is dropped, and therefore cancelled, before `arm`
    /// is asked for a new one. `arm` receives the quiet period and must
    /// schedule a callback that calls [`Debouncer::take`].
    pub fn call<F>(&mut self, args: T, arm: F)
    where
        F: FnOnce(Duration) -> H,
    {
        self.timer = None;
        self.args = Some(args);
        self.timer = Some(arm(self.wait));
    }

    /// Take the arguments of the pending call, if any.
    ///
    /// Called from the timer callback. The handle itself stays in place until
    /// the next call or [`Debouncer::cancel`], so a callback never drops the
    /// timer that is running it.
    pub const fn take(&mut self) -> Option<T> {
        self.args.take()
    }

    /// Whether a call is waiting for its timer.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.args.is_some()
    }

    /// Drop the pending call and cancel its timer.
    ///
    /// Returns `true` if a call was pending.
    pub fn cancel(&mut self) -> bool {
        self.timer = None;
        self.args.take().is_some()
    }
}
