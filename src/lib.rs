//! # typeahead
//!
//! Debounced, cancellation-safe search orchestration for UI hosts.
//!
//! ## Overview
//!
//! This library is the non-visual core of a search input: a stateful
//! controller that runs caller-supplied asynchronous lookups, keeps the
//! result set plus two derived views of it (filtered, sorted), and tells a
//! single subscriber what to render. Everything visual (layout, tiling,
//! theming) is the host's business; the host only implements
//! [`SearchListener`](search::SearchListener) and repaints from whatever
//! list it is handed. It includes:
//!
//! - **Search orchestration**: [`search::SearchController`] owns the
//!   canonical result list, at most one in-flight lookup, and the
//!   replay memory. A superseded lookup is cancelled and its completion
//!   is discarded, so only the most recent search ever publishes.
//! - **View pipeline**: post-hoc sorting and filtering of results without
//!   re-querying, with a fixed active-view precedence
//!   (sorted > filtered > canonical).
//! - **Debounce**: [`debounce::DebouncedInput`] delays controller
//!   invocation until typing has been quiescent for a configured duration
//!   and the query meets a minimum length.
//! - **Runtime sharing**: [`runtime`] lets the crate spawn its tasks on
//!   the host's tokio runtime when one is running, or on a lazily
//!   created global runtime otherwise.
//!
//! ## Feature Flags
//!
//! - `debounce`: the input coordinator (enabled by default). Hosts that
//!   drive the controller directly can disable it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use typeahead::prelude::*;
//!
//! #[derive(Clone)]
//! struct Track { title: String }
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = SearchController::<Track>::new();
//!     let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!     controller.set_listener(events);
//!
//!     controller.search("love", |query: String| async move {
//!         Ok(fetch_tracks(&query).await?)
//!     });
//!
//!     // rx now yields SearchEvent::Loading, then SearchEvent::Results(..)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the operation surface and the listener/lookup seams.
///
/// # Usage
///
/// ```rust
/// use typeahead::prelude::*;
/// ```
pub mod prelude {
    pub use crate::search::{
        Comparator, Lookup, LookupError, LookupFuture, SearchController, SearchEvent,
        SearchListener,
    };

    #[cfg(feature = "debounce")]
    pub use crate::debounce::{DebounceConfig, DebouncedInput, ScheduledTrigger};
}

pub mod runtime;
pub mod search;

#[cfg(feature = "debounce")]
pub mod debounce;
