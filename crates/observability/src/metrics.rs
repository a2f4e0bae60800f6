//! Call monitoring for repository access.
//!
//! A [`CallMonitor`] is injected into whatever layer wants its calls counted
//! and timed. There is no process-wide instance.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Environment variable that toggles call monitoring.
pub const CALL_MONITOR_ENV: &str = "PETCLINIC_CALL_MONITOR";

/// Monitoring settings, read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub enabled: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MonitorConfig {
    /// `PETCLINIC_CALL_MONITOR=false` (or `0`, `off`, `no`) disables
    /// monitoring; anything else, including an unset variable, leaves it on.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(CALL_MONITOR_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let enabled = match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) => !matches!(v.as_str(), "false" | "0" | "off" | "no"),
            None => true,
        };
        Self { enabled }
    }
}

/// Counts monitored calls and accumulates their wall-clock time.
#[derive(Debug)]
pub struct CallMonitor {
    enabled: AtomicBool,
    call_count: AtomicU64,
    accumulated_ms: AtomicU64,
}

impl Default for CallMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

impl CallMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            call_count: AtomicU64::new(0),
            accumulated_ms: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Run `f`, counting and timing it when monitoring is enabled.
    ///
    /// Failed calls are counted too.
    pub fn invoke<T>(&self, operation: &'static str, f: impl FnOnce() -> T) -> T {
        if !self.is_enabled() {
            return f();
        }

        let started = Instant::now();
        let out = f();
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.accumulated_ms.fetch_add(elapsed_ms, Ordering::Relaxed);
        ::tracing::trace!(operation, elapsed_ms, "monitored call");
        out
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Average call time in milliseconds, `0` before the first call.
    pub fn call_time(&self) -> u64 {
        let count = self.call_count();
        if count == 0 {
            return 0;
        }
        self.accumulated_ms.load(Ordering::Relaxed) / count
    }

    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
        self.accumulated_ms.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_calls_when_enabled() {
        let monitor = CallMonitor::default();
        let value = monitor.invoke("findOwnerById", || 7);
        monitor.invoke("findAllOwners", || ());

        assert_eq!(value, 7);
        assert_eq!(monitor.call_count(), 2);
    }

    #[test]
    fn disabled_monitor_passes_calls_through() {
        let monitor = CallMonitor::new(MonitorConfig { enabled: false });
        assert_eq!(monitor.invoke("findVets", || "ok"), "ok");
        assert_eq!(monitor.call_count(), 0);
        assert_eq!(monitor.call_time(), 0);
    }

    #[test]
    fn reset_clears_counters() {
        let monitor = CallMonitor::default();
        monitor.invoke("savePet", || ());
        monitor.reset();
        assert_eq!(monitor.call_count(), 0);
        assert_eq!(monitor.call_time(), 0);
    }

    #[test]
    fn config_values() {
        assert!(MonitorConfig::from_value(None).enabled);
        assert!(MonitorConfig::from_value(Some("true")).enabled);
        assert!(!MonitorConfig::from_value(Some("false")).enabled);
        assert!(!MonitorConfig::from_value(Some(" 0 ")).enabled);
        assert!(!MonitorConfig::from_value(Some("OFF")).enabled);
    }
}
