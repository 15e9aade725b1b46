/// Unit tests for DiError and DiResult types

use std::error::Error;
use std::sync::Arc;
use tokenwire::{DiError, DiResult, SharedError};

#[test]
fn test_error_display_duplicate_creator() {
    let error = DiError::DuplicateCreator("Config".to_string());
    assert_eq!(error.to_string(), "Cannot add creator: creator for \"Config\" already added");
}

#[test]
fn test_error_display_duplicate_injection() {
    let error = DiError::DuplicateInjection {
        consumer: "App".to_string(),
        existing: "Config".to_string(),
        injected: "DevConfig".to_string(),
        index: 0,
    };
    assert_eq!(
        error.to_string(),
        "Cannot inject \"DevConfig\": consumer \"App\" already injects \"Config\" at index 0"
    );
}

#[test]
fn test_error_display_duplicate_replacement() {
    let error = DiError::DuplicateReplacement {
        original: "Config".to_string(),
        existing: "DevConfig".to_string(),
    };
    assert_eq!(error.to_string(), "Cannot replace \"Config\": it is already replaced by \"DevConfig\"");
}

#[test]
fn test_error_display_prepare_and_get() {
    assert_eq!(
        DiError::MissingCreator("Server".to_string()).to_string(),
        "Cannot prepare object: creator for \"Server\" was not added"
    );
    assert_eq!(
        DiError::AlreadyPrepared("Server".to_string()).to_string(),
        "Cannot prepare object: \"Server\" is already prepared"
    );
    assert_eq!(
        DiError::NotPrepared("Server".to_string()).to_string(),
        "Cannot get object: \"Server\" was not prepared"
    );
}

#[test]
fn test_error_display_circular() {
    let path = vec!["ServiceA".to_string(), "ServiceB".to_string(), "ServiceA".to_string()];
    let error = DiError::Circular(path);
    assert_eq!(error.to_string(), "Circular dependency: ServiceA -> ServiceB -> ServiceA");
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded(100);
    assert_eq!(error.to_string(), "Max depth 100 exceeded");
}

#[test]
fn test_creator_failed_exposes_source() {
    let source: SharedError = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "timed out"));
    let error = DiError::CreatorFailed {
        key: "Database".to_string(),
        source,
    };

    assert_eq!(error.to_string(), "Creator for \"Database\" failed: timed out");
    assert_eq!(error.source().unwrap().to_string(), "timed out");
}

#[test]
fn test_error_is_clone() {
    let error = DiError::MissingInjection {
        consumer: "App".to_string(),
        index: 1,
    };
    let cloned = error.clone();
    assert_eq!(error.to_string(), cloned.to_string());
}

#[test]
fn test_di_result_propagates_with_question_mark() {
    fn inner() -> DiResult<u8> {
        Err(DiError::NotPrepared("Logger".to_string()))
    }

    fn outer() -> DiResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(DiError::NotPrepared(name)) if name == "Logger"));
}

#[test]
fn test_error_converts_to_box_error() {
    let boxed: tokenwire::BoxError = DiError::DepthExceeded(3).into();
    assert_eq!(boxed.to_string(), "Max depth 3 exceeded");
}
