//! Debounced input coordination.
//!
//! Rate-limits controller invocation from a rapidly-changing text input:
//! each change cancels the pending trigger and, when the text is long
//! enough, schedules a new one. Only the last trigger within a quiescent
//! window ever invokes the controller.
//!
//! # Control Flow
//!
//! ```text
//! input_changed(text)
//!   ├── cancel pending trigger
//!   ├── len(text) < min_query_len → publish local Cleared, stop
//!   └── schedule trigger(quiet_period)
//!         └── fires unsuperseded → controller.search(text, lookup)
//! ```
//!
//! The below-threshold clear is published directly to the controller's
//! listener slot without invoking the controller itself: it is local
//! input state, not a search outcome.

mod trigger;

pub use trigger::ScheduledTrigger;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::trace;

use crate::search::{Lookup, SearchController};

// =============================================================================
// Configuration
// =============================================================================

/// Debounce knobs: how long input must be quiescent before a search is
/// issued, and how short a query is ignored outright.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use typeahead::debounce::DebounceConfig;
///
/// let config = DebounceConfig::default()
///     .with_quiet_period(Duration::from_millis(300))
///     .with_min_query_len(3);
/// assert_eq!(config.min_query_len, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long the input must stay unchanged before the controller is
    /// invoked.
    pub quiet_period: Duration,
    /// Minimum query length (in characters) that triggers a search.
    /// Anything shorter publishes a local cleared state instead.
    pub min_query_len: usize,
}

impl Default for DebounceConfig {
    /// 250 ms of quiescence, single-character minimum.
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(250),
            min_query_len: 1,
        }
    }
}

impl DebounceConfig {
    /// Returns the config with `quiet_period` replaced.
    #[must_use]
    pub const fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Returns the config with `min_query_len` replaced.
    #[must_use]
    pub const fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }
}

// =============================================================================
// DebouncedInput
// =============================================================================

/// The input coordinator: feeds text changes to a [`SearchController`]
/// only after the input has been quiescent for the configured duration.
///
/// Scheduling a new trigger implicitly cancels the previous unfired one,
/// so firing is exclusive. The cancellation race (a trigger whose timer
/// elapsed concurrently with the cancel) is closed by an epoch counter:
/// a fired trigger re-checks that no newer input arrived before touching
/// the controller. Dropping the coordinator cancels any pending trigger.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use typeahead::debounce::{DebounceConfig, DebouncedInput};
/// use typeahead::search::SearchController;
///
/// let controller = Arc::new(SearchController::<String>::new());
/// let mut input = DebouncedInput::new(
///     Arc::clone(&controller),
///     |query: String| async move { Ok(run_query(&query).await?) },
///     DebounceConfig::default().with_min_query_len(3),
/// );
///
/// input.input_changed("ru");   // below threshold: local clear
/// input.input_changed("rust"); // search fires 250 ms after last change
/// ```
pub struct DebouncedInput<T> {
    controller: Arc<SearchController<T>>,
    lookup: Arc<dyn Lookup<T>>,
    config: DebounceConfig,
    pending: Option<ScheduledTrigger>,
    /// Bumped on every input change (and on drop); a trigger only fires
    /// the controller when its captured epoch is still current.
    epoch: Arc<AtomicU64>,
}

impl<T: Clone + Send + 'static> DebouncedInput<T> {
    /// Creates a coordinator driving `controller` with `lookup`.
    pub fn new(
        controller: Arc<SearchController<T>>,
        lookup: impl Lookup<T> + 'static,
        config: DebounceConfig,
    ) -> Self {
        Self {
            controller,
            lookup: Arc::new(lookup),
            config,
            pending: None,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handles a text change.
    ///
    /// Cancels any pending trigger. Below the minimum length, publishes
    /// a local cleared state synchronously; the controller's `search`
    /// is never invoked for short input. Otherwise schedules a trigger
    /// for [`DebounceConfig::quiet_period`] from now.
    pub fn input_changed(&mut self, text: &str) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        if text.chars().count() < self.config.min_query_len {
            trace!(query = %text, "below minimum length, publishing local clear");
            self.controller.listener_slot().notify_cleared();
            return;
        }

        let controller = Arc::clone(&self.controller);
        let lookup = Arc::clone(&self.lookup);
        let epoch_counter = Arc::clone(&self.epoch);
        let query = text.to_owned();
        self.pending = Some(ScheduledTrigger::schedule(
            self.config.quiet_period,
            move || {
                if epoch_counter.load(Ordering::SeqCst) == epoch {
                    controller.search_shared(query, lookup);
                } else {
                    trace!("trigger superseded between timer and fire");
                }
            },
        ));
    }

    /// Whether a trigger is scheduled and has not fired yet.
    #[must_use]
    pub fn has_pending_trigger(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|trigger| !trigger.is_finished())
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> DebounceConfig {
        self.config
    }

    /// The controller this coordinator drives.
    #[must_use]
    pub fn controller(&self) -> &Arc<SearchController<T>> {
        &self.controller
    }
}

impl<T> Drop for DebouncedInput<T> {
    /// Teardown cancels the pending trigger so no stale search fires
    /// after the coordinator is gone.
    fn drop(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(trigger) = self.pending.take() {
            trigger.cancel();
        }
    }
}
