mod category_service;
mod tree_builder;

pub use category_service::CategoryService;
pub use tree_builder::{build_tree, CategoryTreeNode, OrphanPolicy};
