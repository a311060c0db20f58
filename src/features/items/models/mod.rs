mod item;

pub use item::{Item, ItemStatus, ITEM_COLUMNS};
