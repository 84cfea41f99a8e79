mod controller;
mod item;
mod list;
mod order;

pub use controller::ShoppingListController;
pub use item::{Completion, ShoppingItem};
pub use list::{ListAction, ShoppingList, Transition};
pub use order::display_order;
