//! Unit tests for error.rs
//!
//! Covers Display output of every variant and the logging error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("LOD levels are not sorted".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("LOD levels are not sorted"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Scene 'attic' not found".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("attic"));
}

#[test]
fn test_asset_load_failed_display() {
    let err = Error::AssetLoadFailed {
        locator: "/public/exitDoor.glb".to_string(),
        reason: "404 Not Found".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("/public/exitDoor.glb"));
    assert!(display.contains("404 Not Found"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("no outdoor scene".to_string());
    assert_eq!(format!("{}", err), "Initialization failed: no outdoor scene");
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("swap failed".to_string());
    assert_eq!(format!("{}", err), "Backend error: swap failed");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidConfig("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_keeps_message() {
    let err = Error::AssetLoadFailed {
        locator: "a.glb".to_string(),
        reason: "parse".to_string(),
    };
    let copy = err.clone();
    assert_eq!(format!("{}", err), format!("{}", copy));
    assert!(format!("{:?}", copy).contains("AssetLoadFailed"));
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("plaza3d::ErrorTest", "frame {} rejected", 7);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "frame 7 rejected"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn bails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("plaza3d::ErrorTest", "bailing on {}", flag);
        }
        Ok(1)
    }

    assert!(bails(true).is_err());
    assert_eq!(bails(false).unwrap(), 1);
}

#[test]
fn test_config_err_builds_invalid_config() {
    let err = crate::config_err!("plaza3d::ErrorTest", "max {} < min {}", 1, 2);
    assert!(matches!(err, Error::InvalidConfig(ref msg) if msg == "max 1 < min 2"));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidResource("gone".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
