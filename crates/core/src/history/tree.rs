use std::ops::Index;

use super::Path;

/// Stable handle to a node in a [`Tree`].
///
/// Handles stay valid for the lifetime of the tree because nodes are never
/// removed. A handle is only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the node's position in insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One recorded state and its place in the tree.
#[derive(Debug, Clone)]
pub struct Node<S> {
    state: S,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<S> Node<S> {
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the node's children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An append-only tree of visited states.
///
/// Nodes live in an arena and refer to each other by [`NodeId`], so the tree
/// can grow while paths and browsers hold handles into it. A tree may have
/// several roots, one per independently started timeline.
#[derive(Debug, Clone)]
pub struct Tree<S> {
    nodes: Vec<Node<S>>,
    roots: Vec<NodeId>,
}

impl<S> Tree<S> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Records `state` as a child of `parent`, or as a new root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn add_state(&mut self, state: S, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());

        match parent {
            Some(parent) => {
                assert!(
                    parent.0 < self.nodes.len(),
                    "parent node does not belong to this tree"
                );
                self.nodes[parent.0].children.push(id);
            }
            None => self.roots.push(id),
        }

        self.nodes.push(Node {
            state,
            parent,
            children: Vec::new(),
        });

        id
    }

    /// Returns the path that runs through `node`.
    ///
    /// See [`Path::containing`].
    #[must_use]
    pub fn make_containing_path(&self, node: NodeId) -> Path {
        Path::containing(self, node)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn state(&self, id: NodeId) -> Option<&S> {
        self.node(id).map(Node::state)
    }

    /// Returns the roots in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates from `node` up to its root, both inclusive.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), |&id| self[id].parent)
    }

    /// Returns the number of edges between `node` and its root.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count() - 1
    }
}

impl<S> Default for Tree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Index<NodeId> for Tree<S> {
    type Output = Node<S>;

    fn index(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_parent_and_child_links() {
        let mut tree = Tree::new();
        let root = tree.add_state("root", None);
        let a = tree.add_state("a", Some(root));
        let b = tree.add_state("b", Some(root));
        let a1 = tree.add_state("a1", Some(a));

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree[root].children(), &[a, b]);
        assert_eq!(tree[a1].parent(), Some(a));
        assert!(tree[root].is_root());
        assert!(tree[b].is_leaf());
        assert_eq!(tree.state(a1), Some(&"a1"));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut tree = Tree::new();
        let root = tree.add_state(0, None);
        let one = tree.add_state(1, Some(root));
        let two = tree.add_state(2, Some(one));

        let ancestors: Vec<_> = tree.ancestors(two).collect();

        assert_eq!(ancestors, vec![two, one, root]);
        assert_eq!(tree.depth(two), 2);
        assert_eq!(tree.depth(root), 0);
    }

    #[test]
    fn supports_several_roots() {
        let mut tree = Tree::new();
        let first = tree.add_state('x', None);
        let second = tree.add_state('y', None);

        assert_eq!(tree.roots(), &[first, second]);
        assert!(tree.node(NodeId(5)).is_none());
    }

    #[test]
    #[should_panic(expected = "parent node does not belong to this tree")]
    fn rejects_foreign_parent() {
        let mut other = Tree::new();
        other.add_state(0, None);
        let foreign = other.add_state(1, None);

        let mut tree = Tree::new();
        tree.add_state(0, Some(foreign));
    }
}
