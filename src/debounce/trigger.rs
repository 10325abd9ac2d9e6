//! Cancellable scheduled-task abstraction.
//!
//! A [`ScheduledTrigger`] runs an action once, after a delay, unless it
//! is cancelled first. It is the timer seam of the debounce coordinator
//! and is not tied to any particular event loop beyond the crate's
//! shared runtime handling: the backing task spawns through
//! [`runtime::handle()`](crate::runtime::handle), so it lands on the
//! host's runtime when one is running.

use std::fmt;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::trace;

use crate::runtime;

/// A one-shot action scheduled to run after a delay.
///
/// Cancellation is best-effort at the task level (the sleeping task is
/// aborted), so a trigger that has already entered its action cannot be
/// interrupted; callers that need exactness guard the action itself, the
/// way [`DebouncedInput`](super::DebouncedInput) does with its epoch
/// counter. Dropping the trigger cancels it.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use typeahead::debounce::ScheduledTrigger;
///
/// let trigger = ScheduledTrigger::schedule(Duration::from_millis(250), || {
///     println!("quiescent");
/// });
///
/// // Typing again? Replace it:
/// trigger.cancel();
/// ```
pub struct ScheduledTrigger {
    handle: AbortHandle,
}

impl ScheduledTrigger {
    /// Schedules `action` to run once after `delay`.
    ///
    /// A zero delay still goes through the timer, so the action never
    /// runs synchronously inside the caller's stack frame.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        trace!(?delay, "scheduling trigger");
        let task = runtime::handle().spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        Self {
            handle: task.abort_handle(),
        }
    }

    /// Cancels the trigger. A no-op when it already fired.
    pub fn cancel(&self) {
        trace!("cancelling trigger");
        self.handle.abort();
    }

    /// Whether the backing task has finished, either fired or observed
    /// its cancellation.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTrigger {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl fmt::Debug for ScheduledTrigger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScheduledTrigger")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}
