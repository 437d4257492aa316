use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::AnalysisResult;

use super::{VisionClient, VisionError};

struct ScriptedCall {
    delay: Duration,
    result: Result<AnalysisResult, VisionError>,
}

/// A vision client returning canned results.
///
/// Scripted calls are consumed in order; once the script is empty every call
/// returns the default analysis immediately.
pub struct MockVisionClient {
    default: AnalysisResult,
    script: Mutex<VecDeque<ScriptedCall>>,
    calls: AtomicUsize,
}

impl MockVisionClient {
    pub fn returning(analysis: AnalysisResult) -> Self {
        Self {
            default: analysis,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queues one call that resolves to `result` after `delay`.
    #[must_use]
    pub fn then_after(
        self,
        delay: Duration,
        result: Result<AnalysisResult, VisionError>,
    ) -> Self {
        self.lock_script().push_back(ScriptedCall { delay, result });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<ScriptedCall>> {
        match self.script.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn analyze(
        &self,
        _image_base64: &str,
        _mime_type: &str,
    ) -> Result<AnalysisResult, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.lock_script().pop_front();
        match next {
            Some(call) => {
                if !call.delay.is_zero() {
                    tokio::time::sleep(call.delay).await;
                }
                call.result
            }
            None => Ok(self.default.clone()),
        }
    }
}

/// A vision client that always fails with the given error.
pub struct FailingVisionClient {
    error: VisionError,
    calls: AtomicUsize,
}

impl FailingVisionClient {
    pub fn new(error: VisionError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionClient for FailingVisionClient {
    async fn analyze(
        &self,
        _image_base64: &str,
        _mime_type: &str,
    ) -> Result<AnalysisResult, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
