use serde::{Deserialize, Serialize};

/// Persisted countdown record.
///
/// The completion history is most-recent first and only ever grows at the
/// head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_notification_id: Option<String>,
    #[serde(default, rename = "completedAtTimestamp")]
    completed_at: Vec<i64>,
}

impl CountdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_notification_id(&self) -> Option<&str> {
        self.current_notification_id.as_deref()
    }

    /// Timestamp of the most recent completion.
    pub fn last_completed(&self) -> Option<i64> {
        self.completed_at.first().copied()
    }

    /// Every completion, most recent first.
    pub fn history(&self) -> &[i64] {
        &self.completed_at
    }

    /// Prepend a completion and link the notification scheduled for it.
    pub fn record_completion(&mut self, at: i64, notification_id: Option<String>) {
        self.completed_at.insert(0, at);
        self.current_notification_id = notification_id;
    }
}
