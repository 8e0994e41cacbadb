use std::collections::{HashMap, HashSet};

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::menu::models::MenuItem;

/// What to do with a category whose declared parent is not in the supplied
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Drop the category (and anything attached under it) from the output
    Drop,
    /// Fail the whole assembly with a validation error
    Reject,
}

/// One node of the assembled category tree. Built fresh on every read,
/// never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTreeNode {
    pub id: i64,
    pub name: String,
    pub menu_items: Vec<MenuItem>,
    pub children: Vec<CategoryTreeNode>,
}

/// Assemble a forest from a flat category list plus each category's menu
/// items.
///
/// Root order and child order both follow the input order of `categories`;
/// no sort is applied. Categories must have unique ids. A category whose
/// parent id does not resolve is handled per `policy`; with
/// `OrphanPolicy::Drop` it appears neither in the root list nor under any
/// parent. The transform is pure and deterministic for a given input order.
pub fn build_tree(
    categories: &[Category],
    mut items_by_category: HashMap<i64, Vec<MenuItem>>,
    policy: OrphanPolicy,
) -> Result<Vec<CategoryTreeNode>> {
    let known_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();

    let mut roots: Vec<i64> = Vec::new();
    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();

    for category in categories {
        match category.parent_id {
            None => roots.push(category.id),
            Some(parent) if known_ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(category.id);
            }
            Some(parent) => match policy {
                OrphanPolicy::Drop => {
                    tracing::warn!(
                        category_id = category.id,
                        parent_id = parent,
                        "dropping category with unknown parent"
                    );
                }
                OrphanPolicy::Reject => {
                    return Err(AppError::Validation(format!(
                        "Category {} references unknown parent {}",
                        category.id, parent
                    )));
                }
            },
        }
    }

    let mut names: HashMap<i64, String> = categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    Ok(roots
        .iter()
        .map(|&id| assemble(id, &mut names, &mut items_by_category, &mut children_of))
        .collect())
}

// Walks down from a root only; a node has exactly one parent, so the part of
// the forest reachable from roots cannot contain a cycle.
fn assemble(
    id: i64,
    names: &mut HashMap<i64, String>,
    items_by_category: &mut HashMap<i64, Vec<MenuItem>>,
    children_of: &mut HashMap<i64, Vec<i64>>,
) -> CategoryTreeNode {
    let children = children_of
        .remove(&id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| assemble(child, names, items_by_category, children_of))
        .collect();

    CategoryTreeNode {
        id,
        name: names.remove(&id).unwrap_or_default(),
        menu_items: items_by_category.remove(&id).unwrap_or_default(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            parent_id,
        }
    }

    fn menu_item(id: i64, category_id: i64, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id,
            category_id,
            name: name.to_string(),
            price,
            description: String::new(),
        }
    }

    #[test]
    fn test_roots_and_children_placement() {
        // A: root, B: child of A, C: unknown parent -> dropped entirely
        let categories = vec![
            category(1, "A", None),
            category(2, "B", Some(1)),
            category(3, "C", Some(99)),
        ];

        let tree = build_tree(&categories, HashMap::new(), OrphanPolicy::Drop).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, 2);
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_orphan_subtree_is_dropped_with_it() {
        // The orphan's own child is attached to the orphan, which is never
        // reachable from a root, so both disappear.
        let categories = vec![
            category(1, "root", None),
            category(2, "orphan", Some(42)),
            category(3, "orphan-child", Some(2)),
        ];

        let tree = build_tree(&categories, HashMap::new(), OrphanPolicy::Drop).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_reject_policy_reports_dangling_parent() {
        let categories = vec![category(1, "A", None), category(2, "B", Some(99))];

        let err = build_tree(&categories, HashMap::new(), OrphanPolicy::Reject).unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("unknown parent 99"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_child_order_follows_input_order() {
        let categories = vec![
            category(10, "root", None),
            category(3, "third", Some(10)),
            category(1, "first", Some(10)),
            category(2, "second", Some(10)),
        ];

        let tree = build_tree(&categories, HashMap::new(), OrphanPolicy::Drop).unwrap();

        let child_ids: Vec<i64> = tree[0].children.iter().map(|c| c.id).collect();
        assert_eq!(child_ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_menu_items_attached_to_their_category() {
        let categories = vec![category(1, "drinks", None), category(2, "hot", Some(1))];
        let mut items = HashMap::new();
        items.insert(1, vec![menu_item(7, 1, "water", 100)]);
        items.insert(2, vec![menu_item(8, 2, "tea", 250), menu_item(9, 2, "coffee", 400)]);

        let tree = build_tree(&categories, items, OrphanPolicy::Drop).unwrap();

        assert_eq!(tree[0].menu_items.len(), 1);
        assert_eq!(tree[0].menu_items[0].name, "water");
        assert_eq!(tree[0].children[0].menu_items.len(), 2);
        assert_eq!(tree[0].children[0].menu_items[1].price, 400);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let categories = vec![
            category(1, "A", None),
            category(2, "B", Some(1)),
            category(3, "C", None),
            category(4, "D", Some(3)),
            category(5, "E", Some(3)),
        ];
        let mut items = HashMap::new();
        items.insert(2, vec![menu_item(1, 2, "soup", 300)]);

        let first = build_tree(&categories, items.clone(), OrphanPolicy::Drop).unwrap();
        let second = build_tree(&categories, items, OrphanPolicy::Drop).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_multiple_roots_keep_input_order() {
        let categories = vec![
            category(5, "second-root", None),
            category(2, "first-root", None),
        ];

        let tree = build_tree(&categories, HashMap::new(), OrphanPolicy::Drop).unwrap();

        let root_ids: Vec<i64> = tree.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![5, 2]);
    }
}
