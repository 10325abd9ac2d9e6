#![cfg(feature = "debounce")]
//! Debounce coordinator tests on a paused clock: threshold handling,
//! quiescence, trigger replacement, and teardown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rstest::rstest;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use typeahead::debounce::{DebounceConfig, DebouncedInput};
use typeahead::search::{Lookup, LookupError, SearchController, SearchEvent};

// =============================================================================
// Helpers
// =============================================================================

struct LookupProbe {
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl LookupProbe {
    fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lookup(&self) -> impl Lookup<i32> + 'static {
        let calls = Arc::clone(&self.calls);
        let queries = Arc::clone(&self.queries);
        move |query: String| {
            let calls = Arc::clone(&calls);
            let queries = Arc::clone(&queries);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                queries.lock().unwrap().push(query);
                Ok::<_, LookupError>(vec![1])
            }
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

fn harness(
    config: DebounceConfig,
) -> (
    DebouncedInput<i32>,
    LookupProbe,
    UnboundedReceiver<SearchEvent<i32>>,
) {
    let controller = Arc::new(SearchController::new());
    let (events, receiver) = unbounded_channel();
    controller.set_listener(events);
    let probe = LookupProbe::new();
    let input = DebouncedInput::new(controller, probe.lookup(), config);
    (input, probe, receiver)
}

/// Polls the runtime a few turns without advancing the clock, so
/// spawned trigger and lookup tasks can run.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn advance(duration: Duration) {
    settle().await;
    tokio::time::advance(duration).await;
    settle().await;
}

// =============================================================================
// Threshold
// =============================================================================

/// Scenario: input below the minimum length publishes a local cleared
/// state synchronously and the controller's search is never invoked.
#[rstest]
#[tokio::test(start_paused = true)]
async fn below_threshold_clears_without_searching() {
    let config = DebounceConfig::default()
        .with_quiet_period(Duration::from_millis(250))
        .with_min_query_len(3);
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("ab");
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Cleared);
    assert!(!input.has_pending_trigger());

    // quiescence changes nothing: no trigger was scheduled
    advance(Duration::from_millis(500)).await;
    assert!(receiver.try_recv().is_err());
    assert_eq!(probe.call_count(), 0);
}

/// Shrinking the text below the threshold cancels a trigger scheduled
/// by earlier, longer input.
#[rstest]
#[tokio::test(start_paused = true)]
async fn shrinking_input_cancels_pending_trigger() {
    let config = DebounceConfig::default()
        .with_quiet_period(Duration::from_millis(250))
        .with_min_query_len(3);
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("rust");
    settle().await;
    assert!(input.has_pending_trigger());

    input.input_changed("ru");
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Cleared);

    advance(Duration::from_millis(500)).await;
    assert!(receiver.try_recv().is_err());
    assert_eq!(probe.call_count(), 0);
}

/// A zero minimum means even the empty string searches.
#[rstest]
#[tokio::test(start_paused = true)]
async fn zero_minimum_searches_empty_input() {
    let config = DebounceConfig::default()
        .with_quiet_period(Duration::from_millis(100))
        .with_min_query_len(0);
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("");
    advance(Duration::from_millis(100)).await;

    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Loading);
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Results(vec![1]));
    assert_eq!(probe.queries(), vec![String::new()]);
}

// =============================================================================
// Quiescence
// =============================================================================

/// The trigger fires only after the full quiet period with no further
/// changes, and searches with the latest text.
#[rstest]
#[tokio::test(start_paused = true)]
async fn search_fires_after_quiescence() {
    let config = DebounceConfig::default().with_quiet_period(Duration::from_millis(250));
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("r");
    advance(Duration::from_millis(249)).await;
    assert!(receiver.try_recv().is_err());
    assert_eq!(probe.call_count(), 0);

    advance(Duration::from_millis(1)).await;
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Loading);
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Results(vec![1]));
    assert_eq!(probe.call_count(), 1);
    assert_eq!(probe.queries(), vec!["r".to_string()]);
}

/// Every change within the quiet window restarts the clock; only the
/// last text ever reaches the controller.
#[rstest]
#[tokio::test(start_paused = true)]
async fn only_last_change_in_window_fires() {
    let config = DebounceConfig::default().with_quiet_period(Duration::from_millis(250));
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("r");
    advance(Duration::from_millis(200)).await;
    input.input_changed("ru");
    advance(Duration::from_millis(200)).await;
    input.input_changed("rus");
    advance(Duration::from_millis(200)).await;
    assert!(receiver.try_recv().is_err());

    advance(Duration::from_millis(50)).await;
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Loading);
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Results(vec![1]));
    assert!(receiver.try_recv().is_err());

    assert_eq!(probe.call_count(), 1);
    assert_eq!(probe.queries(), vec!["rus".to_string()]);
}

/// A zero quiet period still defers to the timer, then fires with the
/// latest text.
#[rstest]
#[tokio::test(start_paused = true)]
async fn zero_quiet_period_fires_immediately() {
    let config = DebounceConfig::default().with_quiet_period(Duration::ZERO);
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("now");
    settle().await;

    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Loading);
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Results(vec![1]));
    assert_eq!(probe.call_count(), 1);
}

// =============================================================================
// Teardown
// =============================================================================

/// Dropping the coordinator cancels the pending trigger: no search
/// fires after disposal.
#[rstest]
#[tokio::test(start_paused = true)]
async fn drop_cancels_pending_trigger() {
    let config = DebounceConfig::default().with_quiet_period(Duration::from_millis(250));
    let (mut input, probe, mut receiver) = harness(config);

    input.input_changed("rust");
    settle().await;
    drop(input);

    advance(Duration::from_millis(1000)).await;
    assert!(receiver.try_recv().is_err());
    assert_eq!(probe.call_count(), 0);
}

/// The coordinator leaves direct controller use intact: a host can mix
/// debounced input with immediate searches.
#[rstest]
#[tokio::test(start_paused = true)]
async fn direct_search_bypasses_debounce() {
    let config = DebounceConfig::default().with_quiet_period(Duration::from_millis(250));
    let (input, probe, mut receiver) = harness(config);

    input.controller().search("direct", probe.lookup());
    settle().await;

    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Loading);
    assert_eq!(receiver.try_recv().unwrap(), SearchEvent::Results(vec![1]));
    assert_eq!(probe.queries(), vec!["direct".to_string()]);
}
