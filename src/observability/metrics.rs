//! Navigation metrics.
//!
//! # Metrics
//! - `navigator_navigations_total` (counter): forward navigations by outcome
//! - `navigator_back_total` (counter): back navigations by outcome
//! - `navigator_redirects_total` (counter): redirect hops followed
//! - `navigator_history_depth` (gauge): current history stack length
//!
//! Outcome label is `ok` or the failure kind (`REJECTED`, `NOT_FOUND`, ...).
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; the host installs the recorder
//! - `observability.metrics_enabled = false` turns every call into a no-op

/// Outcome label for successful operations.
pub const OUTCOME_OK: &str = "ok";

/// Handle through which the router and engine record metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationMetrics {
    enabled: bool,
}

impl Default for NavigationMetrics {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NavigationMetrics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_navigation(&self, outcome: &'static str) {
        if self.enabled {
            ::metrics::counter!("navigator_navigations_total", "outcome" => outcome).increment(1);
        }
    }

    pub fn record_back(&self, outcome: &'static str) {
        if self.enabled {
            ::metrics::counter!("navigator_back_total", "outcome" => outcome).increment(1);
        }
    }

    pub fn record_redirect(&self) {
        if self.enabled {
            ::metrics::counter!("navigator_redirects_total").increment(1);
        }
    }

    pub fn set_history_depth(&self, depth: usize) {
        if self.enabled {
            ::metrics::gauge!("navigator_history_depth").set(depth as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    /// Remembers the name of every metric that gets registered.
    #[derive(Default)]
    struct NameRecorder {
        names: Mutex<Vec<String>>,
    }

    impl NameRecorder {
        fn names(&self) -> Vec<String> {
            self.names.lock().unwrap().clone()
        }

        fn note(&self, key: &Key) {
            self.names.lock().unwrap().push(key.name().to_string());
        }
    }

    impl Recorder for NameRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.note(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.note(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.note(key);
            Histogram::noop()
        }
    }

    fn record_everything(metrics: NavigationMetrics) {
        metrics.record_navigation(OUTCOME_OK);
        metrics.record_back("EMPTY");
        metrics.record_redirect();
        metrics.set_history_depth(3);
    }

    #[test]
    fn test_enabled_metrics_reach_recorder() {
        let recorder = NameRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            record_everything(NavigationMetrics::default())
        });

        assert_eq!(
            recorder.names(),
            vec![
                "navigator_navigations_total",
                "navigator_back_total",
                "navigator_redirects_total",
                "navigator_history_depth",
            ]
        );
    }

    #[test]
    fn test_disabled_metrics_record_nothing() {
        let recorder = NameRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            record_everything(NavigationMetrics::disabled())
        });

        assert!(recorder.names().is_empty());
    }
}
