//! # Taskly Core Library
//!
//! Business logic for Taskly: a persistent shopping list and a recurring
//! "done the thing" countdown with local notifications. Every operation is
//! available through the `taskly` CLI; any richer front end is a thin layer
//! over the same controllers.
//!
//! ## Architecture
//!
//! - **Shopping list**: a pure reducer over [`ShoppingList`] plus a
//!   [`ShoppingListController`] that persists after every edit
//! - **Countdown**: [`CountdownController`] owns the completion history and
//!   derives a [`CountdownStatus`]; [`CountdownTicker`] recomputes it on a
//!   cancellable timer
//! - **Storage**: a [`PersistenceGateway`] over SQLite key-value rows and
//!   TOML configuration
//! - **Notifications**: the [`Notifier`] boundary and a SQLite-backed
//!   [`LocalNotifier`]

pub mod clock;
pub mod countdown;
pub mod error;
pub mod events;
pub mod feedback;
pub mod notify;
pub mod shopping;
pub mod storage;

pub use countdown::{
    CountdownController, CountdownState, CountdownStatus, CountdownTicker, CountdownView,
    DurationBreakdown,
};
pub use error::{ConfigError, CoreError, NotificationError, StorageError, ValidationError};
pub use events::Event;
pub use feedback::{Feedback, FeedbackSignal, RecordingFeedback, TracingFeedback};
pub use notify::{LocalNotifier, NotificationContent, Notifier, Permission};
pub use shopping::{
    display_order, Completion, ListAction, ShoppingItem, ShoppingList, ShoppingListController,
};
pub use storage::{
    Config, Database, DeviceKind, MemoryGateway, PersistenceGateway, COUNTDOWN_KEY,
    SHOPPING_LIST_KEY,
};
