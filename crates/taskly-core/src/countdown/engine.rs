//! Countdown controller.
//!
//! Owns the persisted [`CountdownState`] for one screen. The screen starts
//! in [`CountdownView::Loading`] and only derives a status once the
//! initial read has resolved.
//!
//! ## Completion
//!
//! ```text
//! celebrate -> success pulse -> permission check
//!   granted: cancel previous notification, schedule next one
//!   denied:  advisory (physical device only), no notification
//! -> prepend timestamp -> persist (error returned to caller)
//! ```

use tracing::{debug, info, warn};

use super::state::CountdownState;
use super::status::{CountdownStatus, CountdownView};
use crate::clock::now_ms;
use crate::error::Result;
use crate::events::Event;
use crate::feedback::{Feedback, FeedbackSignal};
use crate::notify::{NotificationContent, Notifier, Permission};
use crate::storage::{Config, DeviceKind, PersistenceGateway, COUNTDOWN_KEY};

pub struct CountdownController<G, N, F> {
    gateway: G,
    notifier: N,
    feedback: F,
    config: Config,
    /// `None` until the initial read resolves.
    state: Option<CountdownState>,
    clock: fn() -> i64,
}

impl<G, N, F> CountdownController<G, N, F>
where
    G: PersistenceGateway,
    N: Notifier,
    F: Feedback,
{
    pub fn new(gateway: G, notifier: N, feedback: F, config: Config) -> Self {
        Self {
            gateway,
            notifier,
            feedback,
            config,
            state: None,
            clock: now_ms,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve the initial read. An absent record is a valid empty state.
    pub fn load(&mut self) -> &CountdownState {
        let state = self
            .gateway
            .load::<CountdownState>(COUNTDOWN_KEY)
            .unwrap_or_default();
        debug!(completions = state.history().len(), "countdown state loaded");
        self.state.insert(state)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&CountdownState> {
        self.state.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Completion timestamps, most recent first. Empty until loaded.
    pub fn history(&self) -> &[i64] {
        self.state.as_ref().map(|s| s.history()).unwrap_or(&[])
    }

    pub fn view(&self) -> CountdownView {
        self.view_at((self.clock)())
    }

    pub fn view_at(&self, now: i64) -> CountdownView {
        match &self.state {
            None => CountdownView::Loading,
            Some(state) => CountdownView::Ready(CountdownStatus::compute(
                state.last_completed(),
                self.config.countdown.interval(),
                now,
            )),
        }
    }

    /// "I have done the thing."
    ///
    /// # Errors
    ///
    /// Returns an error only if the updated state cannot be persisted.
    /// Notification failures are logged and leave the id absent.
    pub fn complete(&mut self) -> Result<Vec<Event>> {
        if self.state.is_none() {
            self.load();
        }
        let mut events = Vec::new();

        self.feedback.emit(FeedbackSignal::Celebrate);
        self.feedback.emit(FeedbackSignal::Success);

        let previous = self
            .state
            .as_ref()
            .and_then(|s| s.current_notification_id())
            .map(str::to_string);
        if let Some(id) = previous {
            match self.notifier.cancel(&id) {
                Ok(()) => events.push(Event::NotificationCancelled { id }),
                Err(e) => warn!(
                    notification_id = %id,
                    error = %e,
                    "could not cancel previous notification"
                ),
            }
        }

        let interval = self.config.countdown.interval();
        let notification_id = match self.notifier.request_permission() {
            Permission::Granted => {
                let content = NotificationContent {
                    title: self.config.notifications.title.clone(),
                };
                match self.notifier.schedule(&content, interval) {
                    Ok(id) => {
                        let interval_ms =
                            i64::try_from(interval.as_millis()).unwrap_or(i64::MAX);
                        let fire_at = (self.clock)().saturating_add(interval_ms);
                        events.push(Event::NotificationScheduled {
                            id: id.clone(),
                            fire_at,
                        });
                        Some(id)
                    }
                    Err(e) => {
                        warn!(error = %e, "could not schedule notification");
                        None
                    }
                }
            }
            Permission::Denied => {
                let advisory = self.config.notifications.device == DeviceKind::Physical;
                info!(advisory, "notification permission denied");
                events.push(Event::NotificationPermissionDenied { advisory });
                None
            }
        };

        let now = (self.clock)();
        let state = self.state.get_or_insert_with(CountdownState::new);
        state.record_completion(now, notification_id.clone());
        self.gateway.save(COUNTDOWN_KEY, &*state)?;

        let next_due_at =
            now.saturating_add(i64::try_from(interval.as_millis()).unwrap_or(i64::MAX));
        events.push(Event::CountdownCompleted {
            completed_at: now,
            next_due_at,
            notification_id,
        });
        Ok(events)
    }
}
