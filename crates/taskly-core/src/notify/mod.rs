//! Notification subsystem boundary.
//!
//! The countdown engine only talks to [`Notifier`]. [`LocalNotifier`]
//! keeps scheduled notifications in SQLite so a CLI session can deliver
//! them later.

mod local;

pub use local::LocalNotifier;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NotificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
}

/// One-shot local notifications.
pub trait Notifier {
    fn request_permission(&self) -> Permission;

    /// Schedule `content` to fire once after `fire_after`. Returns its id.
    fn schedule(
        &self,
        content: &NotificationContent,
        fire_after: Duration,
    ) -> Result<String, NotificationError>;

    fn cancel(&self, id: &str) -> Result<(), NotificationError>;
}
