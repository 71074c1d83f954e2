//! Unit tests for the Engine logging hub
//!
//! IMPORTANT: LOGGER and MIN_SEVERITY are globals shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::plaza3d::Engine;
use crate::plaza3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Other unit tests log concurrently under their own sources
        if entry.source == "plaza3d::Test" {
            self.entries.lock().unwrap().push((entry.severity, entry.message.clone()));
        }
    }
}

fn install() -> Arc<Mutex<Vec<(LogSeverity, String)>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: entries.clone() });
    entries
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// FILTERING
// ============================================================================

#[test]
#[serial]
fn test_entries_below_min_severity_are_dropped() {
    let entries = install();
    Engine::set_min_severity(LogSeverity::Warn);

    crate::engine_info!("plaza3d::Test", "dropped");
    crate::engine_warn!("plaza3d::Test", "kept {}", 1);
    crate::engine_error!("plaza3d::Test", "kept {}", 2);

    let captured = entries.lock().unwrap().clone();
    teardown();

    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0], (LogSeverity::Warn, "kept 1".to_string()));
    assert_eq!(captured[1], (LogSeverity::Error, "kept 2".to_string()));
}

#[test]
#[serial]
fn test_trace_enabled_when_min_is_trace() {
    let entries = install();
    Engine::set_min_severity(LogSeverity::Trace);
    assert!(Engine::is_enabled(LogSeverity::Trace));

    crate::engine_trace!("plaza3d::Test", "lod switch");
    crate::engine_debug!("plaza3d::Test", "task applied");

    let count = entries.lock().unwrap().len();
    teardown();
    assert_eq!(count, 2);
}

#[test]
#[serial]
fn test_min_severity_roundtrip() {
    Engine::set_min_severity(LogSeverity::Error);
    assert_eq!(Engine::min_severity(), LogSeverity::Error);
    assert!(!Engine::is_enabled(LogSeverity::Warn));
    teardown();
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let entries = install();
    crate::engine_info!("plaza3d::Test", "captured");
    Engine::reset_logger();
    crate::engine_info!("plaza3d::Test", "not captured");

    let count = entries.lock().unwrap().len();
    teardown();
    assert_eq!(count, 1);
}

#[test]
#[serial]
fn test_error_macro_records_location() {
    struct LocationLogger(Arc<Mutex<Option<(Option<&'static str>, Option<u32>)>>>);
    impl Logger for LocationLogger {
        fn log(&self, entry: &LogEntry) {
            if entry.source == "plaza3d::Test" {
                *self.0.lock().unwrap() = Some((entry.file, entry.line));
            }
        }
    }

    let slot = Arc::new(Mutex::new(None));
    Engine::set_logger(LocationLogger(slot.clone()));
    crate::engine_error!("plaza3d::Test", "boom");

    let location = slot.lock().unwrap().take();
    teardown();

    let (file, line) = location.expect("error entry should be logged");
    assert!(file.unwrap().ends_with("engine_tests.rs"));
    assert!(line.unwrap() > 0);
}
