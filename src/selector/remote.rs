//! Drives a remote-backed [`Selector`] on a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use super::debounce::Debouncer;
use super::lookup::RemoteLookup;
use super::machine::{Command, Phase, Selector, ValidationError};

/// Point-in-time copy of a selector's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSnapshot {
    pub phase: Phase,
    pub query: String,
    pub results: Vec<String>,
    pub selection: Option<String>,
    pub highlighted: Option<usize>,
    pub error: Option<ValidationError>,
}

impl From<&Selector> for SelectorSnapshot {
    fn from(selector: &Selector) -> Self {
        Self {
            phase: selector.phase(),
            query: selector.query().to_owned(),
            results: selector.results().to_vec(),
            selection: selector.selection().map(str::to_owned),
            highlighted: selector.highlighted(),
            error: selector.validation_error().cloned(),
        }
    }
}

/// A remote selector bound to its lookup and its own debounce timer.
///
/// Event methods are synchronous and must be called from within a Tokio
/// runtime. The selector lock is never held across the lookup's await point.
/// Dropping the driver cancels any pending timer; an in-flight lookup still
/// completes but its result lands on a selector nobody observes.
pub struct RemoteSelector {
    selector: Arc<Mutex<Selector>>,
    debouncer: Debouncer,
    lookup: Arc<dyn RemoteLookup>,
}

impl RemoteSelector {
    pub fn new(lookup: Arc<dyn RemoteLookup>, debouncer: Debouncer) -> Self {
        Self {
            selector: Arc::new(Mutex::new(Selector::new_remote())),
            debouncer,
            lookup,
        }
    }

    pub fn snapshot(&self) -> SelectorSnapshot {
        SelectorSnapshot::from(&*self.lock())
    }

    pub fn query(&self) -> String {
        self.lock().query().to_owned()
    }

    pub fn input(&self, text: impl Into<String>) {
        let command = self.lock().input(text);
        self.apply(command);
    }

    pub fn select(&self, index: usize) -> bool {
        let selected = self.lock().select(index);
        if selected {
            self.debouncer.cancel();
        }
        selected
    }

    pub fn highlight_next(&self) {
        self.lock().highlight_next();
    }

    pub fn highlight_prev(&self) {
        self.lock().highlight_prev();
    }

    pub fn confirm(&self) -> bool {
        let selected = self.lock().confirm();
        if selected {
            self.debouncer.cancel();
        }
        selected
    }

    pub fn focus(&self) {
        self.lock().focus();
    }

    pub fn blur(&self) -> Result<(), ValidationError> {
        self.lock().blur()
    }

    pub fn click_outside(&self) {
        self.lock().click_outside();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lock().validate()
    }

    pub fn set_relevant(&self, relevant: bool) {
        let command = self.lock().set_relevant(relevant);
        self.apply(command);
    }

    /// Cancel the pending timer, as on unmount.
    pub fn teardown(&self) {
        self.debouncer.cancel();
    }

    fn apply(&self, command: Command) {
        match command {
            Command::None => {}
            Command::CancelLookup => {
                self.debouncer.cancel();
            }
            Command::ScheduleLookup => {
                let selector = self.selector.clone();
                let lookup = self.lookup.clone();
                self.debouncer.schedule(async move {
                    let query = lock(&selector).begin_lookup();
                    let Some(query) = query else {
                        return;
                    };
                    trace!(query = %query, "debounced lookup fired");
                    let results = lookup.search(&query).await;
                    let installed = lock(&selector).finish_lookup(&query, results);
                    if !installed {
                        debug!(query = %query, "discarded stale lookup response");
                    }
                });
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Selector> {
        lock(&self.selector)
    }
}

fn lock(selector: &Mutex<Selector>) -> MutexGuard<'_, Selector> {
    selector.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Answers each query after a per-query delay, recording every call.
    #[derive(Default)]
    struct FakeLookup {
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeLookup {
        fn delayed(delays: &[(&str, u64)]) -> Arc<Self> {
            Arc::new(Self {
                delays: delays
                    .iter()
                    .map(|(q, ms)| (q.to_string(), Duration::from_millis(*ms)))
                    .collect(),
                calls: Mutex::default(),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteLookup for FakeLookup {
        async fn search(&self, query: &str) -> Vec<String> {
            self.calls.lock().unwrap().push(query.to_owned());
            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            vec![format!("{query} University")]
        }
    }

    fn driver(lookup: Arc<FakeLookup>) -> RemoteSelector {
        RemoteSelector::new(lookup, Debouncer::default())
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_waits_for_quiet_period() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("st");
        tokio::time::sleep(Duration::from_millis(250)).await;
        selector.input("sta");
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(lookup.calls().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(lookup.calls(), vec!["sta"]);
        assert_eq!(selector.snapshot().results, vec!["sta University"]);
        assert_eq!(selector.snapshot().phase, Phase::Open { loading: false });
    }

    #[tokio::test(start_paused = true)]
    async fn slow_early_response_never_overwrites_later_one() {
        let lookup = FakeLookup::delayed(&[("har", 2_000), ("harv", 10)]);
        let selector = driver(lookup.clone());

        selector.input("har");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(selector.snapshot().phase, Phase::Open { loading: true });

        selector.input("harv");
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(selector.snapshot().results, vec!["harv University"]);

        // The first lookup lands long after the second.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(lookup.calls(), vec!["har", "harv"]);
        assert_eq!(selector.snapshot().results, vec!["harv University"]);
        assert_eq!(selector.query(), "harv");
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_cancels_pending_lookup() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("rice");
        tokio::time::sleep(Duration::from_millis(400)).await;
        selector.input("rice u");
        assert!(selector.select(0));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(lookup.calls(), vec!["rice"]);
        let snapshot = selector.snapshot();
        assert_eq!(snapshot.phase, Phase::Selected);
        assert_eq!(snapshot.selection.as_deref(), Some("rice University"));
        assert_eq!(selector.blur(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_below_minimum_cancels_pending_lookup() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("ba");
        selector.input("b");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(lookup.calls().is_empty());
        assert_eq!(selector.snapshot().phase, Phase::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn becoming_irrelevant_cancels_pending_lookup() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("baylor");
        selector.set_relevant(false);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(lookup.calls().is_empty());
        assert!(selector.snapshot().results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_lookup() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("baylor");
        selector.teardown();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(lookup.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn focus_reopens_without_refetching() {
        let lookup = FakeLookup::delayed(&[]);
        let selector = driver(lookup.clone());

        selector.input("tulane");
        tokio::time::sleep(Duration::from_millis(400)).await;
        selector.click_outside();
        assert_eq!(selector.snapshot().phase, Phase::Typing);

        selector.focus();
        assert!(matches!(selector.snapshot().phase, Phase::Open { .. }));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(lookup.calls().len(), 1);
    }
}
