use serde::{Deserialize, Serialize};

/// Completion state of a shopping item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Incomplete,
    Completed { at: i64 },
}

impl Completion {
    pub fn is_completed(&self) -> bool {
        matches!(self, Completion::Completed { .. })
    }

    pub fn completed_at(&self) -> Option<i64> {
        match self {
            Completion::Completed { at } => Some(*at),
            Completion::Incomplete => None,
        }
    }
}

/// A single line on the shopping list.
///
/// The id is fixed at creation. Persisted as
/// `{id, name, completedAtTimestamp?, lastUpdatedTimestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShoppingItemRecord", into = "ShoppingItemRecord")]
pub struct ShoppingItem {
    id: String,
    name: String,
    completion: Completion,
    last_updated: i64,
}

/// Wire shape of [`ShoppingItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingItemRecord {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at_timestamp: Option<i64>,
    #[serde(default)]
    last_updated_timestamp: i64,
}

impl From<ShoppingItemRecord> for ShoppingItem {
    fn from(record: ShoppingItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            completion: match record.completed_at_timestamp {
                Some(at) => Completion::Completed { at },
                None => Completion::Incomplete,
            },
            last_updated: record.last_updated_timestamp,
        }
    }
}

impl From<ShoppingItem> for ShoppingItemRecord {
    fn from(item: ShoppingItem) -> Self {
        Self {
            completed_at_timestamp: item.completion.completed_at(),
            id: item.id,
            name: item.name,
            last_updated_timestamp: item.last_updated,
        }
    }
}

impl ShoppingItem {
    /// A fresh, incomplete item.
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completion: Completion::Incomplete,
            last_updated: now,
        }
    }

    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    pub fn completed_at(&self) -> Option<i64> {
        self.completion.completed_at()
    }

    pub fn last_updated(&self) -> i64 {
        self.last_updated
    }

    /// Flip the completion state and stamp `now` as the update time.
    pub(crate) fn toggle(&mut self, now: i64) -> Completion {
        self.completion = match self.completion {
            Completion::Incomplete => Completion::Completed { at: now },
            Completion::Completed { .. } => Completion::Incomplete,
        };
        self.last_updated = now;
        self.completion
    }
}
