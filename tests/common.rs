#![allow(dead_code)]

use async_trait::async_trait;
use content_resilience::config::ResilienceConfig;
use content_resilience::monitor::{DegradationReport, MonitoringSink};
use content_resilience::network::ConnectivitySignal;
use content_resilience::validation::{
    ContentFailure, ContentValidator, StructuralValidator, ValidationOutcome, ValidationResult,
};
use content_resilience::{ContentResilienceEngine, ContentResilienceEngineBuilder};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 依序返回預設結果的驗證器，結果用盡後重複最後一個
pub struct ScriptedValidator {
    script: Mutex<VecDeque<ValidationResult<ValidationOutcome>>>,
    last: Mutex<ValidationResult<ValidationOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedValidator {
    pub fn new(script: Vec<ValidationResult<ValidationOutcome>>) -> Self {
        let last = script
            .last()
            .cloned()
            .unwrap_or_else(|| Ok(ValidationOutcome::valid()));
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_failing(message: &str) -> Self {
        Self::new(vec![Err(ContentFailure::failed(message))])
    }

    pub fn always_rejecting(errors: &[&str]) -> Self {
        Self::new(vec![Ok(ValidationOutcome::invalid(
            errors.iter().map(|e| e.to_string()).collect(),
        ))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentValidator for ScriptedValidator {
    async fn validate(&self, _content: &Value) -> ValidationResult<ValidationOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.last.lock().clone())
    }
}

/// 驗證前先等待的驗證器，用於測試逾時
pub struct SlowValidator {
    delay: Duration,
    finished: AtomicBool,
}

impl SlowValidator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: AtomicBool::new(false),
        }
    }

    pub fn finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentValidator for SlowValidator {
    async fn validate(&self, content: &Value) -> ValidationResult<ValidationOutcome> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        StructuralValidator::new().check(content)
    }
}

/// 第一次呼叫立即拒絕，之後每次呼叫都先等待 `stall`
pub struct RejectThenStallValidator {
    stall: Duration,
    calls: AtomicUsize,
}

impl RejectThenStallValidator {
    pub fn new(stall: Duration) -> Self {
        Self {
            stall,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentValidator for RejectThenStallValidator {
    async fn validate(&self, content: &Value) -> ValidationResult<ValidationOutcome> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok(ValidationOutcome::invalid(vec!["missing scenes".to_string()]));
        }
        tokio::time::sleep(self.stall).await;
        StructuralValidator::new().check(content)
    }
}

/// 記錄所有降級事件的監控端
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<DegradationReport>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<DegradationReport> {
        self.reports.lock().clone()
    }
}

impl MonitoringSink for RecordingSink {
    fn report_degradation(&self, report: &DegradationReport) {
        self.reports.lock().push(report.clone());
    }
}

pub fn engine_with(validator: Arc<dyn ContentValidator>) -> Arc<ContentResilienceEngine> {
    ContentResilienceEngineBuilder::new()
        .with_config(ResilienceConfig::default())
        .with_validator(validator)
        .build()
        .expect("無法構建引擎")
}

pub fn engine_with_config(
    config: ResilienceConfig,
    validator: Arc<dyn ContentValidator>,
) -> Arc<ContentResilienceEngine> {
    ContentResilienceEngineBuilder::new()
        .with_config(config)
        .with_validator(validator)
        .build()
        .expect("無法構建引擎")
}

pub fn engine_with_connectivity(
    validator: Arc<dyn ContentValidator>,
    connectivity: Arc<dyn ConnectivitySignal>,
) -> Arc<ContentResilienceEngine> {
    ContentResilienceEngineBuilder::new()
        .with_config(ResilienceConfig::default())
        .with_validator(validator)
        .with_connectivity(connectivity)
        .build()
        .expect("無法構建引擎")
}

pub fn valid_lesson(id: &str) -> Value {
    json!({
        "id": id,
        "version": "2.0.0",
        "metadata": { "title": "Fractions", "language": "en" },
        "scenes": [{ "id": "s1", "kind": "dialogue" }]
    })
}
