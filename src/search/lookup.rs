//! The caller-supplied lookup seam.
//!
//! A lookup maps a query string to an asynchronous list of results. The
//! controller treats it as opaque: it never retries, classifies, or times
//! out a lookup; a lookup that needs a deadline must enforce its own.

use std::future::Future;

use futures::future::BoxFuture;

/// The failure value of a lookup, surfaced to the listener verbatim.
///
/// Boxed so any error type the caller's stack produces can flow through
/// unchanged; the controller performs no classification.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// The in-flight form of a lookup invocation.
pub type LookupFuture<T> = BoxFuture<'static, Result<Vec<T>, LookupError>>;

/// A caller-supplied asynchronous search operation.
///
/// Implementations map a query string to a future resolving to the full
/// result list. The controller calls `lookup` once per issued search and
/// keeps the implementation alive (behind an `Arc`) for
/// [`replay_last_search`](super::SearchController::replay_last_search).
///
/// Plain async closures implement this trait automatically:
///
/// ```rust,ignore
/// use typeahead::search::{Lookup, LookupError};
///
/// let lookup = |query: String| async move {
///     Ok::<_, LookupError>(vec![query.len()])
/// };
/// ```
pub trait Lookup<T>: Send + Sync {
    /// Starts an asynchronous search for `query`.
    ///
    /// The returned future may reject; the failure value is delivered to
    /// the listener as-is. Cancellation is advisory: the controller may
    /// abort the task driving this future, and discards its outcome
    /// either way once the search is superseded.
    fn lookup(&self, query: &str) -> LookupFuture<T>;
}

impl<T, F, Fut> Lookup<T> for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, LookupError>> + Send + 'static,
{
    fn lookup(&self, query: &str) -> LookupFuture<T> {
        Box::pin(self(query.to_owned()))
    }
}
