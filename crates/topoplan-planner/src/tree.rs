//! The rooted backhaul tree under construction.
//!
//! A parent-pointer arena keyed by node ID. Child links are ID sets, not
//! references, so the parent and child never own each other; all lookups go
//! through the arena map.

use std::collections::{BTreeMap, BTreeSet};

use topoplan_model::Band;

/// Per-node attachment state.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Uplink parent; `None` only for the root.
    pub parent: Option<String>,
    /// Band the uplink to the parent runs in; `None` only for the root.
    pub backhaul_band: Option<Band>,
    /// Hops from the root (root = 0).
    pub level: u32,
    /// IDs of directly attached children.
    pub children: BTreeSet<String>,
    /// Own offered load plus the subtree loads of all children, Mbps.
    pub subtree_load: f64,
}

/// Rooted tree arena.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: BTreeMap<String, TreeNode>,
    root: String,
}

impl Tree {
    /// A tree containing only the root.
    pub fn new(root: impl Into<String>, root_load: f64) -> Self {
        let root = root.into();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root.clone(),
            TreeNode {
                parent: None,
                backhaul_band: None,
                level: 0,
                children: BTreeSet::new(),
                subtree_load: root_load,
            },
        );
        Self { nodes, root }
    }

    /// The root node ID.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Number of attached nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Number of children of an attached node.
    pub fn degree(&self, id: &str) -> usize {
        self.nodes.get(id).map_or(0, |n| n.children.len())
    }

    /// True when the attached node has no children.
    pub fn is_leaf(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.children.is_empty())
    }

    /// Attach `child` under `parent` over `band`.
    ///
    /// Sets the child's level, registers it with the parent, and folds the
    /// child's load into the subtree load of every ancestor up to the root.
    /// The caller has already established eligibility; attaching to an
    /// unknown parent or re-attaching a known node is a programming error.
    pub fn attach(&mut self, child: impl Into<String>, child_load: f64, parent: &str, band: Band) {
        let child = child.into();
        debug_assert!(!self.nodes.contains_key(&child), "node {child} attached twice");
        let parent_level = self
            .nodes
            .get(parent)
            .unwrap_or_else(|| panic!("attach to unknown parent {parent}"))
            .level;

        self.nodes.insert(
            child.clone(),
            TreeNode {
                parent: Some(parent.to_string()),
                backhaul_band: Some(band),
                level: parent_level + 1,
                children: BTreeSet::new(),
                subtree_load: child_load,
            },
        );
        self.nodes
            .get_mut(parent)
            .expect("parent vanished")
            .children
            .insert(child);

        // Propagate the new load up the ancestor chain.
        let mut cursor = Some(parent.to_string());
        while let Some(id) = cursor {
            let node = self.nodes.get_mut(&id).expect("ancestor vanished");
            node.subtree_load += child_load;
            cursor = node.parent.clone();
        }
    }

    /// Attached node IDs in breadth-first order: level ascending, ID
    /// ascending within a level.
    pub fn bfs_order(&self) -> Vec<String> {
        let mut ids: Vec<&String> = self.nodes.keys().collect();
        ids.sort_by_key(|id| (self.nodes[*id].level, (*id).clone()));
        ids.into_iter().cloned().collect()
    }

    /// Iterate `(id, node)` in sorted ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TreeNode)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Tree {
        // R -> A -> B, plus R -> C
        let mut tree = Tree::new("R", 100.0);
        tree.attach("A", 10.0, "R", Band::High);
        tree.attach("B", 5.0, "A", Band::Low);
        tree.attach("C", 20.0, "R", Band::Low);
        tree
    }

    #[test]
    fn test_root_only() {
        let tree = Tree::new("R", 42.0);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), "R");
        let root = tree.get("R").unwrap();
        assert_eq!(root.parent, None);
        assert_eq!(root.level, 0);
        assert_eq!(root.subtree_load, 42.0);
    }

    #[test]
    fn test_levels_follow_parents() {
        let tree = chain();
        assert_eq!(tree.get("R").unwrap().level, 0);
        assert_eq!(tree.get("A").unwrap().level, 1);
        assert_eq!(tree.get("B").unwrap().level, 2);
        assert_eq!(tree.get("C").unwrap().level, 1);
        assert_eq!(tree.get("B").unwrap().parent.as_deref(), Some("A"));
        assert_eq!(tree.get("B").unwrap().backhaul_band, Some(Band::Low));
    }

    #[test]
    fn test_subtree_load_propagates_to_all_ancestors() {
        let tree = chain();
        assert_eq!(tree.get("B").unwrap().subtree_load, 5.0);
        assert_eq!(tree.get("A").unwrap().subtree_load, 15.0);
        assert_eq!(tree.get("C").unwrap().subtree_load, 20.0);
        assert_eq!(tree.get("R").unwrap().subtree_load, 135.0);
    }

    #[test]
    fn test_degree_and_leaves() {
        let tree = chain();
        assert_eq!(tree.degree("R"), 2);
        assert_eq!(tree.degree("A"), 1);
        assert_eq!(tree.degree("B"), 0);
        assert!(tree.is_leaf("B"));
        assert!(tree.is_leaf("C"));
        assert!(!tree.is_leaf("A"));
    }

    #[test]
    fn test_bfs_order_by_level_then_id() {
        let tree = chain();
        assert_eq!(tree.bfs_order(), vec!["R", "A", "C", "B"]);
    }
}
