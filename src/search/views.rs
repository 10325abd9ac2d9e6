//! The three-tier view pipeline: canonical, filtered, sorted.
//!
//! The canonical list is the most recent full result set. The filtered
//! and sorted lists are derived from it after the fact, without
//! re-querying. Exactly one of the three is the *active view* at any
//! time, chosen by precedence sorted > filtered > canonical (a non-empty
//! sorted list wins, then a non-empty filtered list, then canonical).
//!
//! Source precedence when rebuilding is asymmetric:
//! sorting reads the filtered list when one exists (else canonical),
//! while filtering reads the sorted list when one exists (else
//! canonical). An empty filtered list is indistinguishable from "no
//! filter active"; callers that need that distinction track it
//! themselves.

use std::cmp::Ordering;
use std::sync::Arc;

/// An ordering function applied by [`sort_list`](super::SearchController::sort_list).
///
/// Shared so the remembered comparator can re-sort after a filter is
/// removed. The underlying sort is `slice::sort_by`, which is stable;
/// callers needing a total order across re-sorts should still make the
/// comparator fully order items.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The controller-owned result lists and the remembered comparator.
pub(crate) struct ResultViews<T> {
    canonical: Vec<T>,
    filtered: Vec<T>,
    sorted: Vec<T>,
    comparator: Option<Comparator<T>>,
}

impl<T: Clone> ResultViews<T> {
    pub(crate) const fn new() -> Self {
        Self {
            canonical: Vec::new(),
            filtered: Vec::new(),
            sorted: Vec::new(),
            comparator: None,
        }
    }

    pub(crate) fn canonical(&self) -> &[T] {
        &self.canonical
    }

    /// The list currently published to the host.
    pub(crate) fn active_view(&self) -> &[T] {
        if !self.sorted.is_empty() {
            &self.sorted
        } else if !self.filtered.is_empty() {
            &self.filtered
        } else {
            &self.canonical
        }
    }

    /// Replaces the canonical list wholesale. Prior filter and sort
    /// state does not survive a new result set.
    pub(crate) fn replace_canonical(&mut self, items: Vec<T>) {
        self.canonical = items;
        self.filtered.clear();
        self.sorted.clear();
        self.comparator = None;
    }

    /// Remembers `comparator` and rebuilds the sorted list from a copy
    /// of the filtered list (or canonical, when no filter is active).
    pub(crate) fn apply_sort(&mut self, comparator: Comparator<T>) -> &[T] {
        let mut next = if self.filtered.is_empty() {
            self.canonical.clone()
        } else {
            self.filtered.clone()
        };
        next.sort_by(|a, b| (*comparator)(a, b));
        self.sorted = next;
        self.comparator = Some(comparator);
        &self.sorted
    }

    /// Rebuilds the filtered list by applying `predicate` over the
    /// sorted list (or canonical, when no sort is active), preserving
    /// the source order of the kept items.
    pub(crate) fn apply_filter(&mut self, mut predicate: impl FnMut(&T) -> bool) -> &[T] {
        let source = if self.sorted.is_empty() {
            &self.canonical
        } else {
            &self.sorted
        };
        let next: Vec<T> = source.iter().filter(|&item| predicate(item)).cloned().collect();
        self.filtered = next;
        &self.filtered
    }

    /// Clears the filtered list. When a comparator is remembered, the
    /// sorted list is rebuilt from canonical and stays the active view;
    /// otherwise canonical becomes active again.
    pub(crate) fn remove_filter(&mut self) -> &[T] {
        self.filtered.clear();
        if let Some(comparator) = self.comparator.clone() {
            let mut next = self.canonical.clone();
            next.sort_by(|a, b| (*comparator)(a, b));
            self.sorted = next;
            &self.sorted
        } else {
            &self.canonical
        }
    }

    /// Clears the sorted list and forgets the comparator. The filtered
    /// list becomes active when non-empty, else canonical.
    pub(crate) fn remove_sort(&mut self) -> &[T] {
        self.sorted.clear();
        self.comparator = None;
        if self.filtered.is_empty() {
            &self.canonical
        } else {
            &self.filtered
        }
    }

    pub(crate) fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
