//! Search orchestration: controller, listener seam, and view pipeline.
//!
//! This module is the single source of truth for search execution. The
//! [`SearchController`] runs caller-supplied asynchronous lookups with
//! cancellation and race-safety, maintains three tiers of the result set
//! (canonical, filtered, sorted), and notifies one subscriber of state
//! transitions.
//!
//! # State Transitions
//!
//! Every operation ends by emitting exactly one notification:
//!
//! | operation            | notification                                    |
//! |----------------------|-------------------------------------------------|
//! | `search`             | `Loading`, then later `Results` **or** `Error`  |
//! | `replay_last_search` | as `search`; nothing when there is no memory    |
//! | `clear`              | `Cleared`                                       |
//! | `sort_list`          | `Results` (the rebuilt sorted view)             |
//! | `filter_list`        | `Results` (the rebuilt filtered view)           |
//! | `remove_sort`        | `Results` (filtered if non-empty, else canonical)|
//! | `remove_filter`      | `Results` (re-sorted, or canonical)             |
//!
//! A search that has been superseded by a newer one never publishes: its
//! task is aborted best-effort, and a completion that outlives the abort
//! is identified by generation number and discarded.
//!
//! # Examples
//!
//! ```rust,ignore
//! use typeahead::search::SearchController;
//!
//! let controller = SearchController::<String>::new();
//! let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! controller.set_listener(events);
//!
//! controller.search("ab", |query: String| async move {
//!     Ok(vec![format!("{query}-1"), format!("{query}-2")])
//! });
//! ```

mod controller;
mod event;
mod lookup;
mod views;

pub use controller::SearchController;
pub use event::{SearchEvent, SearchListener};
pub use lookup::{Lookup, LookupError, LookupFuture};
pub use views::Comparator;
