//! Rooted search tree over grid cells, grown one layer at a time.
//! This module exists so bidirectional search can grow two independent trees and merge them.
//! It does not decide which cells are traversable; callers supply the expansion rule.

use std::collections::BTreeSet;

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTree {
    cell: Pos,
    children: Vec<SearchTree>,
}

impl SearchTree {
    pub fn new(root: Pos) -> Self {
        Self { cell: root, children: Vec::new() }
    }

    pub fn cell(&self) -> Pos {
        self.cell
    }

    pub fn children(&self) -> &[SearchTree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn leaves(&self) -> Vec<&SearchTree> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    /// Expands every current leaf by one layer and returns how many nodes were added.
    ///
    /// Leaves created during this call are not expanded again until the next call.
    pub fn propagate<F>(&mut self, mut expand: F) -> usize
    where
        F: FnMut(Pos) -> Vec<Pos>,
    {
        self.grow(&mut expand)
    }

    pub fn contains(&self, cell: Pos) -> bool {
        self.cell == cell || self.children.iter().any(|child| child.contains(cell))
    }

    /// Every node's cell in pre-order.
    pub fn nodes(&self) -> Vec<Pos> {
        let mut nodes = Vec::new();
        self.collect_nodes(&mut nodes);
        nodes
    }

    /// First cell of this tree, in pre-order, that also appears anywhere in `other`.
    pub fn common_node(&self, other: &SearchTree) -> Option<Pos> {
        let theirs: BTreeSet<Pos> = other.nodes().into_iter().collect();
        self.nodes().into_iter().find(|cell| theirs.contains(cell))
    }

    /// Cells from the root down to `target`, inclusive.
    pub fn path_to(&self, target: Pos) -> Option<Vec<Pos>> {
        let mut path = Vec::new();
        self.collect_path(target, &mut path).then_some(path)
    }

    fn grow<F>(&mut self, expand: &mut F) -> usize
    where
        F: FnMut(Pos) -> Vec<Pos>,
    {
        if self.is_leaf() {
            self.children = expand(self.cell).into_iter().map(SearchTree::new).collect();
            return self.children.len();
        }
        let mut added = 0;
        for child in &mut self.children {
            added += child.grow(expand);
        }
        added
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a SearchTree>) {
        if self.is_leaf() {
            leaves.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(leaves);
        }
    }

    fn collect_nodes(&self, nodes: &mut Vec<Pos>) {
        nodes.push(self.cell);
        for child in &self.children {
            child.collect_nodes(nodes);
        }
    }

    fn collect_path(&self, target: Pos, path: &mut Vec<Pos>) -> bool {
        path.push(self.cell);
        if self.cell == target || self.children.iter().any(|child| child.collect_path(target, path))
        {
            return true;
        }
        path.pop();
        false
    }
}
