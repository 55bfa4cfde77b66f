mod common;

use assert_matches::assert_matches;
use common::{
    engine_with, engine_with_config, valid_lesson, RejectThenStallValidator, ScriptedValidator,
    SlowValidator,
};
use content_resilience::config::ResilienceConfig;
use content_resilience::validation::{ContentFailure, ValidationOutcome};
use content_resilience::{
    ContentOutcome, DegradationLevel, DegradationReason, DegradeOptions, DegradedContent,
    HandleOptions, MetadataDetail, RecoveryStrategy,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_retry_exhaustion_makes_max_plus_one_attempts() {
    let validator = Arc::new(ScriptedValidator::always_failing("network request failed"));
    let engine = engine_with(validator.clone());
    let started = tokio::time::Instant::now();

    let outcome = engine
        .handle_content(valid_lesson("lesson-1"), HandleOptions::default().with_max_retries(2))
        .await;

    assert_eq!(validator.calls(), 3);
    // 退避 1s + 2s
    assert!(started.elapsed() >= Duration::from_secs(3));

    let info = outcome.degradation_info().expect("應該降級");
    assert_eq!(info.reason(), DegradationReason::NetworkFailure);
    assert_eq!(info.retry_count(), 2);
    assert_eq!(info.metadata().retry_count(), Some(2));
    assert_matches!(
        &info.metadata().detail,
        MetadataDetail::Failure { error, .. } if error == "network request failed"
    );
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_recovers_on_retry() {
    let validator = Arc::new(ScriptedValidator::new(vec![
        Err(ContentFailure::failed("connection reset")),
        Ok(ValidationOutcome::valid()),
    ]));
    let engine = engine_with(validator.clone());
    let content = valid_lesson("lesson-2");

    let outcome = engine
        .handle_content(content.clone(), HandleOptions::default().with_content_id("lesson-2"))
        .await;

    assert_eq!(outcome, ContentOutcome::Original(content));
    assert_eq!(validator.calls(), 2);
    assert!(engine.cache().contains("lesson-2"));
    assert_eq!(engine.degradation_stats().total, 0);
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_failure_is_not_retried() {
    let validator = Arc::new(ScriptedValidator::always_failing("Unexpected token < in JSON"));
    let engine = engine_with(validator.clone());
    let started = tokio::time::Instant::now();

    let outcome = engine
        .handle_content(valid_lesson("lesson-3"), HandleOptions::default())
        .await;

    // 沒有退避等待；第二次呼叫是修復後的重新驗證
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(validator.calls(), 2);
    let info = outcome.degradation_info().unwrap();
    assert_eq!(info.reason(), DegradationReason::MalformedContent);
    assert_eq!(info.level(), DegradationLevel::Minor);
    assert_eq!(info.retry_count(), 0);
}

#[tokio::test]
async fn test_memory_pressure_goes_offline_immediately() {
    let validator = Arc::new(ScriptedValidator::always_failing("JavaScript heap out of memory"));
    let engine = engine_with(validator.clone());

    let outcome = engine
        .handle_content(valid_lesson("lesson-4"), HandleOptions::default())
        .await;

    assert_eq!(validator.calls(), 1);
    let degraded = outcome.as_degraded().unwrap();
    let info = degraded.degradation_info();
    assert_eq!(info.reason(), DegradationReason::MemoryPressure);
    assert_eq!(info.level(), DegradationLevel::Critical);
    assert_eq!(info.strategy(), RecoveryStrategy::Offline);
    assert!(degraded.content_id().unwrap().starts_with("offline-"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_wins_race_and_late_result_is_discarded() {
    let validator = Arc::new(SlowValidator::new(Duration::from_secs(10)));
    let engine = engine_with(validator.clone());

    let outcome = engine
        .handle_content(
            valid_lesson("lesson-5"),
            HandleOptions::default().with_timeout_ms(50).with_max_retries(0),
        )
        .await;

    let info = outcome.degradation_info().unwrap();
    assert_eq!(info.reason(), DegradationReason::TimeoutError);
    assert_eq!(info.level(), DegradationLevel::Moderate);
    assert_eq!(info.strategy(), RecoveryStrategy::Default);
    assert_matches!(
        &info.metadata().detail,
        MetadataDetail::Failure { error, retry_count: 0 } if error == "Validation timeout after 50ms"
    );

    tokio::time::advance(Duration::from_secs(20)).await;
    assert!(!validator.finished());
    assert_eq!(engine.degradation_stats().total, 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_are_retried() {
    let validator = Arc::new(SlowValidator::new(Duration::from_secs(10)));
    let engine = engine_with(validator);

    let outcome = engine
        .handle_content(
            valid_lesson("lesson-6"),
            HandleOptions::default().with_timeout_ms(100).with_max_retries(1),
        )
        .await;

    let info = outcome.degradation_info().unwrap();
    assert_eq!(info.reason(), DegradationReason::TimeoutError);
    assert_eq!(info.retry_count(), 1);
}

#[tokio::test]
async fn test_fast_validation_within_timeout_passes() {
    let validator = Arc::new(ScriptedValidator::new(vec![Ok(ValidationOutcome::valid())]));
    let engine = engine_with(validator);
    let content = valid_lesson("lesson-7");

    let outcome = engine
        .handle_content(content.clone(), HandleOptions::default().with_timeout_ms(1_000))
        .await;

    assert_eq!(outcome.as_original(), Some(&content));
    assert!(outcome.degradation_info().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_repair_revalidation_honours_caller_timeout() {
    let validator = Arc::new(RejectThenStallValidator::new(Duration::from_secs(4)));
    let engine = engine_with(validator.clone());
    let started = tokio::time::Instant::now();

    let outcome = engine
        .handle_content(
            json!({ "invalid": "content" }),
            HandleOptions::default().with_timeout_ms(50),
        )
        .await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(validator.calls(), 2);
    let degraded = outcome.as_degraded().unwrap();
    assert_eq!(degraded.degradation_info().reason(), DegradationReason::ValidationError);
    assert_matches!(degraded, DegradedContent::Fallback(_));
}

#[tokio::test(start_paused = true)]
async fn test_public_repair_uses_configured_timeout() {
    let mut config = ResilienceConfig::default();
    config.retry.timeout_ms = 100;
    let validator = Arc::new(RejectThenStallValidator::new(Duration::from_secs(4)));
    let engine = engine_with_config(config, validator.clone());

    // 先消耗掉立即拒絕的第一次呼叫
    let _ = engine
        .handle_content(json!({}), HandleOptions::default().with_timeout_ms(10))
        .await;
    let started = tokio::time::Instant::now();

    assert!(engine.attempt_repair(&json!({ "id": "lesson-9" })).await.is_none());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_unset_options_follow_retry_config() {
    let mut config = ResilienceConfig::default();
    config.retry.max_retries = 0;
    let validator = Arc::new(ScriptedValidator::always_failing("network request failed"));
    let engine = engine_with_config(config, validator.clone());

    let outcome = engine
        .handle_content(valid_lesson("lesson-8"), HandleOptions::default())
        .await;

    assert_eq!(validator.calls(), 1);
    let info = outcome.degradation_info().unwrap();
    assert_eq!(info.retry_count(), 0);
    assert_eq!(info.max_retries(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_applies_by_default() {
    let mut config = ResilienceConfig::default();
    config.retry.timeout_ms = 50;
    config.retry.max_retries = 0;
    let engine = engine_with_config(config, Arc::new(SlowValidator::new(Duration::from_secs(10))));

    let outcome = engine
        .handle_content(valid_lesson("lesson-10"), HandleOptions::default())
        .await;

    let info = outcome.degradation_info().unwrap();
    assert_eq!(info.reason(), DegradationReason::TimeoutError);
    assert_matches!(
        &info.metadata().detail,
        MetadataDetail::Failure { error, .. } if error == "Validation timeout after 50ms"
    );
}

#[tokio::test]
async fn test_explicit_degradation_uses_configured_max_retries() {
    let mut config = ResilienceConfig::default();
    config.retry.max_retries = 4;
    let engine = engine_with_config(config, Arc::new(ScriptedValidator::new(vec![])));

    let degraded = engine.degrade_content(
        DegradationReason::MalformedContent,
        None,
        DegradeOptions {
            retry_count: 2,
            ..DegradeOptions::default()
        },
    );

    let info = degraded.degradation_info();
    assert_eq!(info.max_retries(), 4);
    // 2/4 未超過一半
    assert_eq!(info.level(), DegradationLevel::Minor);
}
