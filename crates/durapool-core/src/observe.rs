//! Optional metrics instrumentation for durapool.
//!
//! When the `observe` feature is enabled, pool operations emit counters and
//! histograms via the [`metrics`] crate. A downstream application must install
//! a metrics recorder (e.g. `metrics-exporter-prometheus`) to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record a push (counter + commit latency histogram).
///
/// - `durapool.push.total` – counter with `outcome` label (`ok` / `fail`)
/// - `durapool.push.duration_seconds` – histogram
#[inline]
pub fn record_push(duration: std::time::Duration, success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "fail" };
        metrics::counter!("durapool.push.total", "outcome" => outcome).increment(1);
        metrics::histogram!("durapool.push.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, success);
    }
}

/// Outcome of a pop, used as a metrics label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    Item,
    Empty,
    Failed,
}

/// Record a pop (counter + commit latency histogram).
///
/// - `durapool.pop.total` – counter with `outcome` label (`item` / `empty` / `fail`)
/// - `durapool.pop.duration_seconds` – histogram
#[inline]
pub fn record_pop(duration: std::time::Duration, outcome: PopOutcome) {
    #[cfg(feature = "observe")]
    {
        let outcome = match outcome {
            PopOutcome::Item => "item",
            PopOutcome::Empty => "empty",
            PopOutcome::Failed => "fail",
        };
        metrics::counter!("durapool.pop.total", "outcome" => outcome).increment(1);
        metrics::histogram!("durapool.pop.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, outcome);
    }
}

/// Set the pool length gauge after a scan.
///
/// - `durapool.length` – gauge
#[inline]
pub fn set_length(length: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::gauge!("durapool.length").set(length as f64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = length;
    }
}
