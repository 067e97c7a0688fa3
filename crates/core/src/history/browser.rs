use std::{cell::Cell, fmt, rc::Rc};

use crate::State;

use super::{NodeId, Path, SharedTree, Tree};

/// A read-only view of one timeline, handed to history-dependent steps.
///
/// The browser is bound to a [`Path`] over a shared tree. It never mutates the
/// tree, and because the path follows the tree as it grows, a browser created
/// at the start of a run observes every state appended since. Positions count
/// from the root: position `0` is the first state of the timeline.
///
/// Lookups walk parent links back from the timeline's last node, so reading
/// the recent end of a long timeline costs only as much as the distance from
/// its end.
pub struct HistoryBrowser<S> {
    tree: SharedTree<S>,
    path: Path,
    tip: Cell<Tip>,
}

/// The last node seen on the path and the timeline length up to it.
///
/// Nodes on a path stay on it as the tree grows, so the tip only moves forward.
#[derive(Debug, Clone, Copy)]
struct Tip {
    node: NodeId,
    len: usize,
}

impl<S> HistoryBrowser<S> {
    /// Creates a browser over `path` in `tree`.
    pub fn new(tree: SharedTree<S>, path: Path) -> Self {
        let tip = Tip {
            node: path.root(),
            len: 1,
        };
        Self {
            tree,
            path,
            tip: Cell::new(tip),
        }
    }

    /// Returns the path this browser is bound to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of states on the timeline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.advance(&self.tree.borrow()).len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the cached tip to the current end of the path.
    fn advance(&self, tree: &Tree<S>) -> Tip {
        let mut tip = self.tip.get();
        while let Some(next) = self.path.next_node(tree, tip.node) {
            tip.node = next;
            tip.len += 1;
        }
        self.tip.set(tip);
        tip
    }

    /// Iterates over the timeline's nodes, most recent first.
    fn nodes_from_end<'a>(&self, tree: &'a Tree<S>) -> impl Iterator<Item = NodeId> + 'a {
        let tip = self.advance(tree);
        tree.ancestors(tip.node)
    }
}

impl<S: Clone> HistoryBrowser<S> {
    /// Returns the state at `position`, counting from the root.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<S> {
        let offset = self.len().checked_sub(position)?.checked_sub(1)?;
        self.get_from_end(offset)
    }

    /// Returns the state `offset` places before the last one.
    ///
    /// An offset of `0` is the most recent state.
    #[must_use]
    pub fn get_from_end(&self, offset: usize) -> Option<S> {
        let tree = self.tree.borrow();
        let id = self.nodes_from_end(&tree).nth(offset)?;
        Some(tree[id].state().clone())
    }

    /// Returns the most recent state on the timeline.
    #[must_use]
    pub fn last_state(&self) -> S {
        let tree = self.tree.borrow();
        let tip = self.advance(&tree);
        tree[tip.node].state().clone()
    }

    /// Returns every state on the timeline, root first.
    #[must_use]
    pub fn states(&self) -> Vec<S> {
        let tree = self.tree.borrow();
        let mut states: Vec<S> = self
            .nodes_from_end(&tree)
            .map(|id| tree[id].state().clone())
            .collect();
        states.reverse();
        states
    }
}

impl<S: State> HistoryBrowser<S> {
    /// Returns the latest state whose clock is at or before `clock`.
    ///
    /// States without a clock are skipped.
    #[must_use]
    pub fn state_by_clock(&self, clock: f64) -> Option<S> {
        let tree = self.tree.borrow();
        self.nodes_from_end(&tree)
            .map(|id| tree[id].state())
            .find(|state| state.clock().is_some_and(|c| c <= clock))
            .cloned()
    }
}

impl<S> Clone for HistoryBrowser<S> {
    fn clone(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            path: self.path.clone(),
            tip: self.tip.clone(),
        }
    }
}

impl<S> fmt::Debug for HistoryBrowser<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBrowser")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}
