pub mod menu_item_handler;

pub use menu_item_handler::*;
