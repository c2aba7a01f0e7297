//! Lightweight performance instrumentation.
//!
//! Scopes report their elapsed time through `tracing` when enabled with
//! `--perf`; they cost one atomic load otherwise.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::info!(
            target: "folio::perf",
            scope = self.name,
            elapsed_ms = format_args!("{:.2}", self.elapsed_ms()),
            "perf"
        );
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_scope_measures_time() {
        let scope = scope("test.scope");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(scope.elapsed_ms() >= 1.0);
    }
}
