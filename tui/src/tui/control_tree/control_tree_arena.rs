// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Arena backed tree of [`Control`]s.
//!
//! Controls are owned by the tree and referred to by [`ControlId`]. Each node knows its
//! parent id, so bubbling an event up is a walk over ids and doesn't need to know
//! anything about what kind of control sits at each level.

use super::Control;
use std::{collections::HashMap,
          fmt::{Display, Formatter, Write as _}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

impl Display for ControlId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Debug)]
struct ControlNode {
    parent: Option<ControlId>,
    children: Vec<ControlId>,
    control: Box<dyn Control>,
}

/// A node whose `parent` is `None` and which is not the root is detached: it still
/// receives events when focused, but bubbling stops at it.
#[derive(Debug, Default)]
pub struct ControlTree {
    nodes: HashMap<ControlId, ControlNode>,
    root: Option<ControlId>,
    next_id: usize,
}

impl ControlTree {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn root(&self) -> Option<ControlId> { self.root }

    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool { self.nodes.contains_key(&id) }

    /// Replaces the whole tree (detached nodes included) with a single root.
    pub fn set_root(&mut self, control: impl Control + 'static) -> ControlId {
        self.nodes.clear();
        let id = self.insert(None, Box::new(control));
        self.root = Some(id);
        id
    }

    /// Returns `None` if `parent` is not in the tree.
    pub fn add_child(
        &mut self,
        parent: ControlId,
        control: impl Control + 'static,
    ) -> Option<ControlId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.insert(Some(parent), Box::new(control));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        Some(id)
    }

    fn insert(&mut self, parent: Option<ControlId>, control: Box<dyn Control>) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            ControlNode {
                parent,
                children: vec![],
                control,
            },
        );
        id
    }

    /// Removes `id` and all of its descendants. Returns the removed ids, parent first.
    pub fn remove(&mut self, id: ControlId) -> Option<Vec<ControlId>> {
        let deletion_list = self.tree_walk_dfs(id)?;
        self.unlink_from_parent(id);
        for it in &deletion_list {
            self.nodes.remove(it);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        Some(deletion_list)
    }

    /// Cuts `id` loose from its parent, keeping its subtree intact. The root can't be
    /// detached.
    pub fn detach(&mut self, id: ControlId) -> bool {
        if self.root == Some(id) || !self.contains(id) {
            return false;
        }
        self.unlink_from_parent(id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
        true
    }

    fn unlink_from_parent(&mut self, id: ControlId) {
        if let Some(parent_node) = self
            .parent(id)
            .and_then(|parent| self.nodes.get_mut(&parent))
        {
            parent_node.children.retain(|child| *child != id);
        }
    }

    #[must_use]
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn children(&self, id: ControlId) -> Option<&[ControlId]> {
        self.nodes.get(&id).map(|node| node.children.as_slice())
    }

    #[must_use]
    pub fn get(&self, id: ControlId) -> Option<&dyn Control> {
        let node = self.nodes.get(&id)?;
        Some(node.control.as_ref())
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut dyn Control> {
        let node = self.nodes.get_mut(&id)?;
        Some(node.control.as_mut())
    }

    /// Pre-order walk of the subtree rooted at `id`.
    #[must_use]
    pub fn tree_walk_dfs(&self, id: ControlId) -> Option<Vec<ControlId>> {
        if !self.contains(id) {
            return None;
        }
        let mut collected = vec![];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            collected.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Some(collected)
    }

    /// Finds the deepest control under `(x, y)`, starting at the root and descending
    /// into the child whose bounds contain the point. Later children sit on top of
    /// earlier ones, so they are checked first.
    ///
    /// Returns `None` if there is no root or the root doesn't contain the point.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ControlId> {
        let root = self.root?;
        if !self.nodes.get(&root)?.control.bounds().contains(x, y) {
            return None;
        }

        let mut current = root;
        'descend: loop {
            let node = self.nodes.get(&current)?;
            for child in node.children.iter().rev() {
                let hit = self
                    .nodes
                    .get(child)
                    .is_some_and(|it| it.control.bounds().contains(x, y));
                if hit {
                    current = *child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// One line per control, indented by depth, using each control's [`Debug`] output.
    /// Detached subtrees are listed after the root's.
    #[must_use]
    pub fn debug_tree_string(&self) -> String {
        let Some(root) = self.root else {
            return "(empty)".to_string();
        };

        let mut tops = vec![root];
        let mut detached: Vec<ControlId> = self
            .nodes
            .iter()
            .filter(|(id, node)| node.parent.is_none() && **id != root)
            .map(|(id, _)| *id)
            .collect();
        detached.sort();
        tops.extend(detached);

        let mut acc = String::new();
        for top in tops {
            let mut stack = vec![(top, 0_usize)];
            while let Some((id, depth)) = stack.pop() {
                let Some(node) = self.nodes.get(&id) else {
                    continue;
                };
                let detached_marker = if depth == 0 && id != root { " (detached)" } else { "" };
                _ = writeln!(
                    acc,
                    "{:indent$}{id} {:?}{detached_marker}",
                    "",
                    node.control,
                    indent = depth * 2
                );
                stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Panel(&'static str, Rect);

    impl Control for Panel {
        fn bounds(&self) -> Rect { self.1 }
    }

    /// ```text
    /// root (0,0 80x24)
    /// ├── left (0,0 40x24)
    /// │   └── button (2,2 10x1)
    /// └── right (40,0 40x24)
    /// ```
    fn make_tree() -> (ControlTree, [ControlId; 4]) {
        let mut tree = ControlTree::new();
        let root = tree.set_root(Panel("root", Rect::new(0, 0, 80, 24)));
        let left = tree.add_child(root, Panel("left", Rect::new(0, 0, 40, 24))).unwrap();
        let button = tree
            .add_child(left, Panel("button", Rect::new(2, 2, 10, 1)))
            .unwrap();
        let right = tree
            .add_child(root, Panel("right", Rect::new(40, 0, 40, 24)))
            .unwrap();
        (tree, [root, left, button, right])
    }

    #[test]
    fn test_parent_and_children_links() {
        let (tree, [root, left, button, right]) = make_tree();
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.parent(button), Some(left));
        assert_eq!(tree.parent(left), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), Some([left, right].as_slice()));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_add_child_to_unknown_parent() {
        let (mut tree, _) = make_tree();
        assert_eq!(
            tree.add_child(ControlId(99), Panel("x", Rect::default())),
            None
        );
    }

    #[test]
    fn test_hit_test_finds_deepest_control() {
        let (tree, [root, left, button, right]) = make_tree();
        assert_eq!(tree.hit_test(5, 2), Some(button));
        assert_eq!(tree.hit_test(5, 3), Some(left));
        assert_eq!(tree.hit_test(50, 10), Some(right));
        assert_eq!(tree.hit_test(79, 23), Some(right));
        assert_eq!(tree.hit_test(80, 0), None);
        assert!(tree.contains(root));
    }

    #[test]
    fn test_hit_test_on_empty_tree() {
        assert_eq!(ControlTree::new().hit_test(0, 0), None);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, [root, left, button, right]) = make_tree();
        assert_eq!(tree.remove(left), Some(vec![left, button]));
        assert!(!tree.contains(button));
        assert_eq!(tree.children(root), Some([right].as_slice()));
        assert_eq!(tree.remove(left), None);

        assert_eq!(tree.remove(root), Some(vec![root, right]));
        assert_eq!(tree.root(), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let (mut tree, [root, left, button, _]) = make_tree();
        assert!(!tree.detach(root));
        assert!(tree.detach(left));
        assert_eq!(tree.parent(left), None);
        assert_eq!(tree.parent(button), Some(left));
        assert!(tree.contains(left));
        assert_eq!(tree.hit_test(5, 2), Some(root));
    }

    #[test]
    fn test_debug_tree_string() {
        let (mut tree, [_, left, ..]) = make_tree();
        let expected = concat!(
            "#0 Panel(\"root\", Rect { x: 0, y: 0, width: 80, height: 24 })\n",
            "  #1 Panel(\"left\", Rect { x: 0, y: 0, width: 40, height: 24 })\n",
            "    #2 Panel(\"button\", Rect { x: 2, y: 2, width: 10, height: 1 })\n",
            "  #3 Panel(\"right\", Rect { x: 40, y: 0, width: 40, height: 24 })\n",
        );
        assert_eq!(tree.debug_tree_string(), expected);

        tree.detach(left);
        let dump = tree.debug_tree_string();
        assert!(dump.contains("#1 Panel(\"left\", Rect { x: 0, y: 0, width: 40, height: 24 }) (detached)"));
        assert_eq!(ControlTree::new().debug_tree_string(), "(empty)");
    }

    #[test]
    fn test_set_root_replaces_tree() {
        let (mut tree, [old_root, ..]) = make_tree();
        let new_root = tree.set_root(Panel("new", Rect::new(0, 0, 1, 1)));
        assert_ne!(new_root, old_root);
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(old_root));
    }
}
