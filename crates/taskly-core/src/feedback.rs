//! Fire-and-forget user feedback (haptics, celebration effects).
//!
//! Handlers never consume a return value from a feedback sink.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSignal {
    /// Positive pulse (item completed, task done).
    Success,
    /// Neutral pulse (item reopened or deleted).
    Impact,
    /// Celebratory visual effect.
    Celebrate,
}

pub trait Feedback: Send + Sync {
    fn emit(&self, signal: FeedbackSignal);
}

impl<T: Feedback + ?Sized> Feedback for std::sync::Arc<T> {
    fn emit(&self, signal: FeedbackSignal) {
        (**self).emit(signal);
    }
}

/// Default sink: records the signal in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn emit(&self, signal: FeedbackSignal) {
        debug!(?signal, "feedback");
    }
}

/// Sink that keeps every signal, in order.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    signals: Mutex<Vec<FeedbackSignal>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<FeedbackSignal> {
        self.signals.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Feedback for RecordingFeedback {
    fn emit(&self, signal: FeedbackSignal) {
        if let Ok(mut signals) = self.signals.lock() {
            signals.push(signal);
        }
    }
}
