use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The CLI prints them; embedders can forward them to a UI layer.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ItemAdded {
        id: String,
        name: String,
        at: i64,
    },
    ItemCompleted {
        id: String,
        at: i64,
    },
    ItemReopened {
        id: String,
        at: i64,
    },
    ItemDeleted {
        id: String,
        name: String,
        at: i64,
    },
    /// Deletion was offered and the user backed out.
    DeleteDeclined {
        id: String,
    },
    CountdownCompleted {
        completed_at: i64,
        next_due_at: i64,
        notification_id: Option<String>,
    },
    NotificationScheduled {
        id: String,
        fire_at: i64,
    },
    NotificationCancelled {
        id: String,
    },
    /// Permission was refused. `advisory` is true when the user should be
    /// told how to enable it (physical devices only).
    NotificationPermissionDenied {
        advisory: bool,
    },
    NotificationDelivered {
        id: String,
        title: String,
        at: i64,
    },
    CountdownSnapshot {
        is_overdue: bool,
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
        target_at: i64,
        at: i64,
    },
}
