use std::cmp::Ordering;

use super::item::{Completion, ShoppingItem};

/// Display order for a shopping list.
///
/// Incomplete items come first, most recently updated at the top. Completed
/// items follow, most recently completed first. The sort is stable, so
/// equal keys keep their stored order.
pub fn display_order(items: &[ShoppingItem]) -> Vec<&ShoppingItem> {
    let mut ordered: Vec<&ShoppingItem> = items.iter().collect();
    ordered.sort_by(|a, b| compare(a, b));
    ordered
}

fn compare(a: &ShoppingItem, b: &ShoppingItem) -> Ordering {
    match (a.completion(), b.completion()) {
        (Completion::Completed { at: a_at }, Completion::Completed { at: b_at }) => b_at.cmp(&a_at),
        (Completion::Completed { .. }, Completion::Incomplete) => Ordering::Greater,
        (Completion::Incomplete, Completion::Completed { .. }) => Ordering::Less,
        (Completion::Incomplete, Completion::Incomplete) => b.last_updated().cmp(&a.last_updated()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(items: &[&'a ShoppingItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn incomplete_by_recency_then_completed() {
        let items = vec![
            ShoppingItem::new("A", "a", 100),
            ShoppingItem::new("B", "b", 200),
            ShoppingItem::new("C", "c", 10).with_completion(Completion::Completed { at: 50 }),
        ];
        assert_eq!(ids(&display_order(&items)), vec!["B", "A", "C"]);
    }

    #[test]
    fn completed_most_recent_first() {
        let items = vec![
            ShoppingItem::new("old", "a", 0).with_completion(Completion::Completed { at: 10 }),
            ShoppingItem::new("new", "b", 0).with_completion(Completion::Completed { at: 90 }),
            ShoppingItem::new("open", "c", 1),
        ];
        assert_eq!(ids(&display_order(&items)), vec!["open", "new", "old"]);
    }

    #[test]
    fn equal_keys_keep_stored_order() {
        let items = vec![
            ShoppingItem::new("first", "a", 5),
            ShoppingItem::new("second", "b", 5),
        ];
        assert_eq!(ids(&display_order(&items)), vec!["first", "second"]);
    }

    #[test]
    fn ordering_does_not_touch_input() {
        let items = vec![ShoppingItem::new("A", "a", 1), ShoppingItem::new("B", "b", 2)];
        let _ = display_order(&items);
        assert_eq!(items[0].id(), "A");
    }
}
