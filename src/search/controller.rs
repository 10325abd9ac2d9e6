//! The search orchestration controller.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

use crate::runtime;

use super::event::ListenerSlot;
use super::lookup::Lookup;
use super::views::{Comparator, ResultViews};
use super::SearchListener;

// =============================================================================
// Replay Memory
// =============================================================================

/// The last successfully completed query and its lookup, retained so the
/// host can re-issue it verbatim.
struct SearchMemory<T> {
    query: String,
    lookup: Arc<dyn Lookup<T>>,
}

impl<T> Clone for SearchMemory<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            lookup: Arc::clone(&self.lookup),
        }
    }
}

// =============================================================================
// Controller State
// =============================================================================

struct ControllerState<T> {
    views: ResultViews<T>,
    memory: Option<SearchMemory<T>>,
    /// Identity of the most recently issued search. A completion whose
    /// generation does not match is superseded and must not publish.
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl<T: Clone> ControllerState<T> {
    const fn new() -> Self {
        Self {
            views: ResultViews::new(),
            memory: None,
            generation: 0,
            in_flight: None,
        }
    }
}

// =============================================================================
// SearchController
// =============================================================================

/// Single source of truth for search execution, cancellation, and the
/// three-tier view pipeline.
///
/// The controller is generic over the result item `T` and never inspects
/// it. It owns at most one in-flight lookup task; issuing a new search
/// aborts the previous task (best-effort) and bumps a generation counter
/// so that even a completion the abort could not reach is discarded
/// rather than published. All notifications go to the single listener
/// registered with [`set_listener`](Self::set_listener).
///
/// None of the operations return errors: lookup failures surface through
/// [`SearchListener::on_error`], a superseded completion is silently
/// discarded, and replaying with no prior success is a silent no-op.
///
/// # Examples
///
/// ```rust,ignore
/// use typeahead::search::SearchController;
///
/// #[tokio::main]
/// async fn main() {
///     let controller = SearchController::<u32>::new();
///     let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();
///     controller.set_listener(events);
///
///     controller.search("4", |query: String| async move {
///         Ok(vec![query.parse().unwrap()])
///     });
///
///     // Loading, then Results([4])
///     while let Some(event) = rx.recv().await { /* render */ }
/// }
/// ```
pub struct SearchController<T> {
    state: Arc<Mutex<ControllerState<T>>>,
    listener: ListenerSlot<T>,
}

impl<T> fmt::Debug for SearchController<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        formatter
            .debug_struct("SearchController")
            .field("generation", &state.generation)
            .field("in_flight", &state.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Default for SearchController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> SearchController<T> {
    /// Creates a controller with empty lists and no subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::new())),
            listener: ListenerSlot::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Subscription
    // -------------------------------------------------------------------------

    /// Registers `listener` as the single active subscriber.
    ///
    /// The controller supports exactly one subscriber; a second
    /// registration replaces the first (last registration wins).
    pub fn set_listener(&self, listener: impl SearchListener<T> + 'static) {
        self.listener.install(Box::new(listener));
    }

    /// Removes the active subscriber. Subsequent notifications are
    /// dropped until a new listener is registered.
    pub fn clear_listener(&self) {
        self.listener.remove();
    }

    // -------------------------------------------------------------------------
    // Search Execution
    // -------------------------------------------------------------------------

    /// Issues a search for `query` using `lookup`.
    ///
    /// Publishes `Loading` immediately. If a previous search is still
    /// outstanding it is cancelled first; cancellation is best-effort
    /// and never fails. On success the canonical list is replaced
    /// wholesale, derived views and the remembered comparator are reset,
    /// the `(query, lookup)` pair is remembered for replay, and
    /// `Results` is published. On failure the canonical list is left
    /// untouched and `Error` carries the failure value, so transient
    /// errors do not flash an empty grid.
    ///
    /// Only the most recently issued search may publish: a completion
    /// from a superseded search is discarded, success or failure alike.
    pub fn search(&self, query: impl Into<String>, lookup: impl Lookup<T> + 'static) {
        self.search_shared(query.into(), Arc::new(lookup));
    }

    pub(crate) fn search_shared(&self, query: String, lookup: Arc<dyn Lookup<T>>) {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            if let Some(previous) = state.in_flight.take() {
                trace!(generation = state.generation, "cancelling superseded search");
                previous.abort();
            }
            self.listener.notify_loading();
            state.generation
        };
        debug!(generation, query = %query, "search issued");

        let future = lookup.lookup(&query);
        let state_handle = Arc::clone(&self.state);
        let listener = self.listener.clone();
        let task = runtime::handle().spawn(async move {
            let outcome = future.await;
            let mut state = state_handle.lock();
            if state.generation != generation {
                trace!(generation, "discarding completion of superseded search");
                return;
            }
            state.in_flight = None;
            match outcome {
                Ok(items) => {
                    debug!(generation, count = items.len(), "search completed");
                    state.views.replace_canonical(items);
                    state.memory = Some(SearchMemory { query, lookup });
                    listener.notify_results(state.views.canonical());
                }
                Err(error) => {
                    debug!(generation, error = %error, "search failed");
                    listener.notify_error(&error);
                }
            }
        });

        let mut state = self.state.lock();
        // A still-newer search may have been issued while we spawned;
        // its abort handle must not be overwritten by ours.
        if state.generation == generation {
            state.in_flight = Some(task.abort_handle());
        }
    }

    /// Re-issues the last successfully completed search with its
    /// original query and lookup.
    ///
    /// A no-op producing no notification when no search has completed
    /// successfully yet.
    pub fn replay_last_search(&self) {
        let memory = self.state.lock().memory.clone();
        match memory {
            Some(memory) => self.search_shared(memory.query, memory.lookup),
            None => trace!("replay requested with nothing to replay"),
        }
    }

    /// Publishes `Cleared`.
    ///
    /// The controller's lists are not mutated: the listener
    /// owns the input field and the rendered state, and resets them in
    /// response. See [`SearchListener::on_clear`].
    pub fn clear(&self) {
        self.listener.notify_cleared();
    }

    // -------------------------------------------------------------------------
    // View Pipeline
    // -------------------------------------------------------------------------

    /// Remembers `comparator`, rebuilds the sorted view from a copy of
    /// the filtered list (or canonical when no filter is active), and
    /// publishes it.
    pub fn sort_list(&self, comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) {
        let comparator: Comparator<T> = Arc::new(comparator);
        let mut state = self.state.lock();
        let view = state.views.apply_sort(comparator);
        self.listener.notify_results(view);
    }

    /// Rebuilds the filtered view by applying `predicate` over the
    /// sorted list (or canonical when no sort is active) and publishes
    /// it, preserving source order.
    ///
    /// A predicate that matches nothing publishes an empty list; the
    /// controller does not distinguish that from "no filter active".
    pub fn filter_list(&self, predicate: impl FnMut(&T) -> bool) {
        let mut state = self.state.lock();
        let view = state.views.apply_filter(predicate);
        self.listener.notify_results(view);
    }

    /// Clears the filtered view. With a remembered comparator the sorted
    /// view is rebuilt from canonical and published; otherwise canonical
    /// is published.
    pub fn remove_filter(&self) {
        let mut state = self.state.lock();
        let view = state.views.remove_filter();
        self.listener.notify_results(view);
    }

    /// Clears the sorted view and forgets the comparator. Publishes the
    /// filtered view when non-empty, else canonical.
    pub fn remove_sort(&self) {
        let mut state = self.state.lock();
        let view = state.views.remove_sort();
        self.listener.notify_results(view);
    }

    // -------------------------------------------------------------------------
    // Read Accessors
    // -------------------------------------------------------------------------

    /// Whether a search is outstanding (issued but not completed,
    /// cancelled, or superseded).
    pub fn is_searching(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    /// Whether the active view is non-empty.
    pub fn has_results(&self) -> bool {
        !self.state.lock().views.active_view().is_empty()
    }

    /// Length of the active view.
    pub fn active_view_len(&self) -> usize {
        self.state.lock().views.active_view().len()
    }

    /// The query of the last successfully completed search, if any.
    pub fn last_query(&self) -> Option<String> {
        self.state
            .lock()
            .memory
            .as_ref()
            .map(|memory| memory.query.clone())
    }

    /// Whether a comparator is currently remembered.
    pub fn is_sorted(&self) -> bool {
        self.state.lock().views.has_comparator()
    }

    pub(crate) fn listener_slot(&self) -> ListenerSlot<T> {
        self.listener.clone()
    }
}
