//! History trees and browsers for history-dependent simulations.
//!
//! A [`Tree`] records every visited state as a node in an arena. Each node
//! knows its parent, so a timeline is recovered by walking up from any node.
//! A [`Path`] picks one timeline from a root down to a leaf and keeps
//! following it as the tree grows. A [`HistoryBrowser`] is the read-only view
//! over a path that history-dependent step functions receive.

mod browser;
mod path;
mod tree;

use std::{cell::RefCell, rc::Rc};

pub use browser::HistoryBrowser;
pub use path::{Path, PathNodes};
pub use tree::{Node, NodeId, Tree};

/// A tree shared between the driver that grows it and the browsers reading it.
pub type SharedTree<S> = Rc<RefCell<Tree<S>>>;
