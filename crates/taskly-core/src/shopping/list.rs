//! Shopping list state and its reducer.
//!
//! `reduce` is pure: it takes the current list, an action and the current
//! time, and returns the next list plus the events and feedback the
//! transition produced. Persisting the result is the controller's job.

use serde::{Deserialize, Serialize};

use super::item::{Completion, ShoppingItem};
use super::order::display_order;
use crate::error::ValidationError;
use crate::events::Event;
use crate::feedback::FeedbackSignal;

/// Edits a user can apply to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Add { name: String },
    ToggleComplete { id: String },
    /// Remove an item. Confirmation happens before this is dispatched.
    Delete { id: String },
}

/// Side effects produced by one reducer step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<Event>,
    pub feedback: Vec<FeedbackSignal>,
}

/// The persisted collection. Stored order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ShoppingItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items in display order.
    pub fn ordered(&self) -> Vec<&ShoppingItem> {
        display_order(&self.items)
    }

    /// Apply `action` at time `now`.
    ///
    /// # Errors
    ///
    /// `EmptyItemName` for a blank add, `UnknownItem` for a toggle or delete
    /// naming an id that is not on the list. The list is unchanged on error.
    pub fn reduce(
        &self,
        action: &ListAction,
        now: i64,
    ) -> Result<(ShoppingList, Transition), ValidationError> {
        let mut next = self.clone();
        let mut transition = Transition::default();

        match action {
            ListAction::Add { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyItemName);
                }
                let id = self.next_id(now);
                next.items.insert(0, ShoppingItem::new(id.clone(), name, now));
                transition.events.push(Event::ItemAdded {
                    id,
                    name: name.to_string(),
                    at: now,
                });
            }
            ListAction::ToggleComplete { id } => {
                let item = next
                    .items
                    .iter_mut()
                    .find(|item| item.id() == id)
                    .ok_or_else(|| ValidationError::UnknownItem(id.clone()))?;
                match item.toggle(now) {
                    Completion::Completed { at } => {
                        transition.feedback.push(FeedbackSignal::Success);
                        transition.events.push(Event::ItemCompleted { id: id.clone(), at });
                    }
                    Completion::Incomplete => {
                        transition.feedback.push(FeedbackSignal::Impact);
                        transition.events.push(Event::ItemReopened {
                            id: id.clone(),
                            at: now,
                        });
                    }
                }
            }
            ListAction::Delete { id } => {
                let pos = next
                    .items
                    .iter()
                    .position(|item| item.id() == id)
                    .ok_or_else(|| ValidationError::UnknownItem(id.clone()))?;
                let removed = next.items.remove(pos);
                transition.feedback.push(FeedbackSignal::Impact);
                transition.events.push(Event::ItemDeleted {
                    id: removed.id().to_string(),
                    name: removed.name().to_string(),
                    at: now,
                });
            }
        }

        Ok((next, transition))
    }

    /// Id derived from the creation time, bumped past any id already taken.
    fn next_id(&self, now: i64) -> String {
        let mut candidate = now;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
