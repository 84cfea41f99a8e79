use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use super::{NotificationContent, Notifier, Permission};
use crate::clock::now_ms;
use crate::error::{NotificationError, StorageError};
use crate::events::Event;
use crate::storage::database::NotificationRecord;
use crate::storage::Database;

/// Notifier backed by the `scheduled_notifications` table.
///
/// Permission is fixed at construction, normally from
/// `notifications.enabled`.
pub struct LocalNotifier {
    db: Database,
    permission: Permission,
    clock: fn() -> i64,
}

impl LocalNotifier {
    pub fn new(db: Database, permission: Permission) -> Self {
        Self {
            db,
            permission,
            clock: now_ms,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Scheduled notifications, soonest first.
    pub fn pending(&self) -> Result<Vec<NotificationRecord>, StorageError> {
        Ok(self.db.list_notifications()?)
    }

    /// Fire every notification due at `now`, removing it from the schedule.
    pub fn deliver_due(&self, now: i64) -> Result<Vec<Event>, StorageError> {
        let due = self.db.take_due_notifications(now)?;
        Ok(due
            .into_iter()
            .map(|n| {
                info!(notification_id = %n.id, title = %n.title, "notification delivered");
                Event::NotificationDelivered {
                    id: n.id,
                    title: n.title,
                    at: now,
                }
            })
            .collect())
    }
}

impl Notifier for LocalNotifier {
    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn schedule(
        &self,
        content: &NotificationContent,
        fire_after: Duration,
    ) -> Result<String, NotificationError> {
        let now = (self.clock)();
        let after_ms = i64::try_from(fire_after.as_millis()).unwrap_or(i64::MAX);
        let record = NotificationRecord {
            id: Uuid::new_v4().to_string(),
            title: content.title.clone(),
            fire_at: now.saturating_add(after_ms),
            scheduled_at: now,
        };
        self.db
            .insert_notification(&record)
            .map_err(|e| NotificationError::ScheduleFailed(e.to_string()))?;
        debug!(notification_id = %record.id, fire_at = record.fire_at, "notification scheduled");
        Ok(record.id)
    }

    fn cancel(&self, id: &str) -> Result<(), NotificationError> {
        let removed = self
            .db
            .delete_notification(id)
            .map_err(|e| NotificationError::CancelFailed {
                id: id.to_string(),
                message: e.to_string(),
            })?;
        if removed {
            Ok(())
        } else {
            Err(NotificationError::CancelFailed {
                id: id.to_string(),
                message: "not scheduled".to_string(),
            })
        }
    }
}
