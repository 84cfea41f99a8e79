//! Owner of the in-memory shopping list.
//!
//! Every edit runs through [`ShoppingList::reduce`], dispatches feedback,
//! then writes the whole list back through the gateway. Write failures are
//! logged and otherwise ignored.

use tracing::{debug, warn};

use super::item::ShoppingItem;
use super::list::{ListAction, ShoppingList};
use crate::clock::now_ms;
use crate::error::ValidationError;
use crate::events::Event;
use crate::feedback::Feedback;
use crate::storage::{PersistenceGateway, SHOPPING_LIST_KEY};

pub struct ShoppingListController<G, F> {
    gateway: G,
    feedback: F,
    list: ShoppingList,
    clock: fn() -> i64,
}

impl<G: PersistenceGateway, F: Feedback> ShoppingListController<G, F> {
    /// Read the persisted list; an absent or unreadable record starts empty.
    pub fn load(gateway: G, feedback: F) -> Self {
        let list = gateway
            .load::<ShoppingList>(SHOPPING_LIST_KEY)
            .unwrap_or_default();
        debug!(items = list.len(), "shopping list loaded");
        Self {
            gateway,
            feedback,
            list,
            clock: now_ms,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    /// Items in display order.
    pub fn ordered(&self) -> Vec<&ShoppingItem> {
        self.list.ordered()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn add(&mut self, name: &str) -> Result<Vec<Event>, ValidationError> {
        self.dispatch(ListAction::Add {
            name: name.to_string(),
        })
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Vec<Event>, ValidationError> {
        self.dispatch(ListAction::ToggleComplete { id: id.to_string() })
    }

    /// Delete after asking `confirm`. Declining is a no-op.
    pub fn delete<C>(&mut self, id: &str, confirm: C) -> Result<Vec<Event>, ValidationError>
    where
        C: FnOnce(&ShoppingItem) -> bool,
    {
        let item = self
            .list
            .get(id)
            .ok_or_else(|| ValidationError::UnknownItem(id.to_string()))?;
        if !confirm(item) {
            debug!(item_id = id, "delete cancelled");
            return Ok(vec![Event::DeleteDeclined { id: id.to_string() }]);
        }
        self.dispatch(ListAction::Delete { id: id.to_string() })
    }

    fn dispatch(&mut self, action: ListAction) -> Result<Vec<Event>, ValidationError> {
        let (next, transition) = self.list.reduce(&action, (self.clock)())?;
        self.list = next;
        for signal in transition.feedback {
            self.feedback.emit(signal);
        }
        self.persist();
        Ok(transition.events)
    }

    fn persist(&self) {
        if let Err(e) = self.gateway.save(SHOPPING_LIST_KEY, &self.list) {
            warn!(error = %e, "failed to persist shopping list");
        }
    }
}
