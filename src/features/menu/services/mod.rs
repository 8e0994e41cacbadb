mod menu_item_service;
mod pricing;

pub use menu_item_service::MenuItemService;
pub use pricing::PricingLookup;
