//! Notification interface between the controller and its host.
//!
//! The controller supports exactly one active subscriber, registered by
//! construction rather than convention: [`ListenerSlot`] holds at most
//! one boxed [`SearchListener`], and installing a new one replaces the
//! previous (last registration wins).

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use super::lookup::LookupError;

// =============================================================================
// Listener Trait
// =============================================================================

/// The notification interface a host implements to receive state changes.
///
/// All four notifications are dispatched synchronously within the
/// execution turn of the operation (or completion) that caused them.
/// Internal locks are held during dispatch, so implementations must not
/// call back into the controller from a notification: record the change
/// and repaint, nothing more.
///
/// `on_loading`, `on_error`, and `on_clear` have empty default bodies;
/// a minimal host only renders lists.
pub trait SearchListener<T>: Send {
    /// A search was issued and its result is pending.
    fn on_loading(&mut self) {}

    /// The active view changed; `items` is the list to render.
    fn on_list_changed(&mut self, items: &[T]);

    /// The lookup failed; `error` is the caller-supplied failure value,
    /// unmodified. The previously published list is still valid.
    fn on_error(&mut self, error: &LookupError) {
        let _ = error;
    }

    /// The host should reset its input and rendered state. The
    /// controller does not touch its own lists on clear.
    fn on_clear(&mut self) {}
}

// =============================================================================
// Event Variant
// =============================================================================

/// The four notification kinds as an owned tagged variant.
///
/// This is the channel-friendly mirror of [`SearchListener`]: sending
/// half of a tokio unbounded channel implements the listener trait by
/// forwarding each notification as a `SearchEvent`, which is also how
/// the integration tests observe the controller.
///
/// `Error` carries the rendered failure message rather than the boxed
/// error value, so the event type stays `Clone` and comparable; hosts
/// that need the raw error implement [`SearchListener`] directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent<T> {
    /// A search was issued and its result is pending.
    Loading,
    /// The active view changed to the contained list.
    Results(Vec<T>),
    /// The lookup failed; the payload is the failure's display rendering.
    Error(String),
    /// The host should reset its input and rendered state.
    Cleared,
}

impl<T: Clone + Send + 'static> SearchListener<T> for UnboundedSender<SearchEvent<T>> {
    fn on_loading(&mut self) {
        let _ = self.send(SearchEvent::Loading);
    }

    fn on_list_changed(&mut self, items: &[T]) {
        let _ = self.send(SearchEvent::Results(items.to_vec()));
    }

    fn on_error(&mut self, error: &LookupError) {
        let _ = self.send(SearchEvent::Error(error.to_string()));
    }

    fn on_clear(&mut self) {
        let _ = self.send(SearchEvent::Cleared);
    }
}

// =============================================================================
// Listener Slot
// =============================================================================

/// Shared single-subscriber slot.
///
/// Cloned by the controller into its completion tasks, and by the
/// debounce coordinator for its local below-threshold clear. Lock order:
/// a holder of the controller state lock may take this lock, never the
/// reverse.
pub(crate) struct ListenerSlot<T> {
    slot: Arc<Mutex<Option<Box<dyn SearchListener<T>>>>>,
}

impl<T> Clone for ListenerSlot<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> ListenerSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Installs `listener`, replacing any previous subscriber.
    pub(crate) fn install(&self, listener: Box<dyn SearchListener<T>>) {
        *self.slot.lock() = Some(listener);
    }

    /// Removes the current subscriber, if any.
    pub(crate) fn remove(&self) {
        *self.slot.lock() = None;
    }

    pub(crate) fn notify_loading(&self) {
        if let Some(listener) = self.slot.lock().as_mut() {
            listener.on_loading();
        }
    }

    pub(crate) fn notify_results(&self, items: &[T]) {
        if let Some(listener) = self.slot.lock().as_mut() {
            listener.on_list_changed(items);
        }
    }

    pub(crate) fn notify_error(&self, error: &LookupError) {
        if let Some(listener) = self.slot.lock().as_mut() {
            listener.on_error(error);
        }
    }

    pub(crate) fn notify_cleared(&self) {
        if let Some(listener) = self.slot.lock().as_mut() {
            listener.on_clear();
        }
    }
}
