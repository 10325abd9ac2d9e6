//! Runtime sharing for controller and trigger tasks.
//!
//! This module provides a global tokio runtime and a handle lookup so the
//! crate can spawn its lookup and trigger tasks without creating new
//! runtimes on each call.
//!
//! # Design Philosophy
//!
//! The controller is meant to be driven from whatever context the host
//! lives in. Two situations must both work:
//!
//! 1. **Host already inside tokio** (the common case for async UIs and
//!    servers): spawns must land on the host's runtime so its time
//!    source, tracing context, and shutdown behavior apply. This also
//!    makes paused-clock tests deterministic.
//! 2. **Host on a plain thread** (immediate-mode UIs, callbacks from
//!    foreign event loops): spawns fall back to a lazily-initialized
//!    global multi-thread runtime that is created once and never dropped.
//!
//! # Performance Characteristics
//!
//! - [`global()`]: O(1) after first initialization (static `LazyLock`)
//! - [`handle()`]: O(1) with thread-local caching of the global handle

use std::cell::RefCell;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime};

// =============================================================================
// Global Runtime
// =============================================================================

/// Global tokio runtime initialized lazily on first access.
///
/// Configured with a multi-thread scheduler, worker threads equal to the
/// number of CPU cores, and all features enabled. The runtime has static
/// lifetime and is never dropped.
static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()
        .expect("Failed to create global tokio runtime")
});

/// Returns a reference to the global runtime.
///
/// The runtime is lazily initialized on first call and shared across all
/// subsequent calls. The same instance is returned from any thread.
///
/// # Examples
///
/// ```rust,ignore
/// use typeahead::runtime::global;
///
/// let runtime = global();
/// runtime.block_on(async {
///     // async work here
/// });
/// ```
#[inline]
#[must_use]
pub fn global() -> &'static Runtime {
    &GLOBAL_RUNTIME
}

// =============================================================================
// Handle Caching
// =============================================================================

thread_local! {
    /// Thread-local cached handle to the global runtime.
    ///
    /// Avoids repeated `global().handle()` lookups; the handle is cloned
    /// on first access per thread.
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Returns a handle to the current or global runtime.
///
/// # Handle Priority
///
/// 1. If inside a tokio runtime: returns `Handle::current()`, preserving
///    the caller's time source and tracing context.
/// 2. Otherwise: returns a cached handle to the global runtime,
///    initializing it if needed.
///
/// # Examples
///
/// ```rust,ignore
/// use typeahead::runtime::handle;
///
/// // Works from outside any runtime
/// handle().spawn(async { /* work */ });
/// ```
///
/// # Note
///
/// This function never panics. The internal `unwrap()` is safe because
/// the cached value is always set before being accessed.
#[inline]
#[must_use]
#[allow(clippy::missing_panics_doc)] // unwrap is safe: we just set the value
pub fn handle() -> Handle {
    // First, try to get the current runtime's handle
    if let Ok(current_handle) = Handle::try_current() {
        return current_handle;
    }

    // Not inside a runtime, use cached global handle
    CACHED_HANDLE.with(|cached| {
        let mut cached = cached.borrow_mut();
        if cached.is_none() {
            *cached = Some(global().handle().clone());
        }
        cached.as_ref().unwrap().clone()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
