use std::collections::BTreeMap;

use super::{NodeId, Tree};

/// One timeline through a [`Tree`], from a root down to a leaf.
///
/// A path stores its root and the child it takes at each fork where it does
/// not follow the first child. Everywhere else it follows the first child, so
/// a path keeps extending as new states are appended below its last node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    root: NodeId,
    decisions: BTreeMap<NodeId, NodeId>,
}

impl Path {
    /// Creates a path that starts at `root` and always follows first children.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            decisions: BTreeMap::new(),
        }
    }

    /// Returns the path that runs from the root of `node` through `node`.
    ///
    /// Below `node`, the path follows first children.
    ///
    /// # Panics
    ///
    /// Panics if `node` was not issued by `tree`.
    #[must_use]
    pub fn containing<S>(tree: &Tree<S>, node: NodeId) -> Self {
        let mut decisions = BTreeMap::new();
        let mut child = node;

        while let Some(parent) = tree[child].parent() {
            if tree[parent].children().first() != Some(&child) {
                decisions.insert(parent, child);
            }
            child = parent;
        }

        Self {
            root: child,
            decisions,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node that follows `node` on this path, if any.
    #[must_use]
    pub fn next_node<S>(&self, tree: &Tree<S>, node: NodeId) -> Option<NodeId> {
        self.decisions
            .get(&node)
            .copied()
            .or_else(|| tree[node].children().first().copied())
    }

    /// Iterates over the path's nodes from root to leaf.
    #[must_use]
    pub fn nodes<'a, S>(&'a self, tree: &'a Tree<S>) -> PathNodes<'a, S> {
        PathNodes {
            path: self,
            tree,
            next: Some(self.root),
        }
    }

    /// Returns the number of nodes on the path.
    #[must_use]
    pub fn len<S>(&self, tree: &Tree<S>) -> usize {
        self.nodes(tree).count()
    }

    /// Returns the leaf the path currently ends at.
    #[must_use]
    pub fn last_node<S>(&self, tree: &Tree<S>) -> NodeId {
        self.nodes(tree).last().unwrap_or(self.root)
    }

    /// Returns `true` if `node` lies on the path.
    #[must_use]
    pub fn contains<S>(&self, tree: &Tree<S>, node: NodeId) -> bool {
        self.nodes(tree).any(|id| id == node)
    }
}

/// Iterator over the nodes of a [`Path`], root first.
#[derive(Debug)]
pub struct PathNodes<'a, S> {
    path: &'a Path,
    tree: &'a Tree<S>,
    next: Option<NodeId>,
}

impl<S> Iterator for PathNodes<'_, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.path.next_node(self.tree, current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds:
    ///
    /// ```text
    /// 0 ─ 1 ─ 2
    ///      └─ 3 ─ 4
    /// ```
    fn forked_tree() -> (Tree<u32>, [NodeId; 5]) {
        let mut tree = Tree::new();
        let n0 = tree.add_state(0, None);
        let n1 = tree.add_state(1, Some(n0));
        let n2 = tree.add_state(2, Some(n1));
        let n3 = tree.add_state(3, Some(n1));
        let n4 = tree.add_state(4, Some(n3));
        (tree, [n0, n1, n2, n3, n4])
    }

    #[test]
    fn default_path_follows_first_children() {
        let (tree, [n0, n1, n2, _, _]) = forked_tree();
        let path = Path::new(n0);

        assert_eq!(path.nodes(&tree).collect::<Vec<_>>(), vec![n0, n1, n2]);
        assert_eq!(path.len(&tree), 3);
        assert_eq!(path.last_node(&tree), n2);
    }

    #[test]
    fn containing_path_takes_the_fork() {
        let (tree, [n0, n1, n2, n3, n4]) = forked_tree();

        let path = tree.make_containing_path(n3);

        assert_eq!(path.root(), n0);
        assert_eq!(path.nodes(&tree).collect::<Vec<_>>(), vec![n0, n1, n3, n4]);
        assert!(path.contains(&tree, n4));
        assert!(!path.contains(&tree, n2));
    }

    #[test]
    fn path_follows_growth() {
        let mut tree = Tree::new();
        let root = tree.add_state(0, None);
        let path = tree.make_containing_path(root);
        assert_eq!(path.len(&tree), 1);

        let mut current = root;
        for value in 1..=3 {
            current = tree.add_state(value, Some(current));
        }

        assert_eq!(path.len(&tree), 4);
        assert_eq!(path.last_node(&tree), current);
    }
}
