//! Two-pass tree walk
//!
//! Containers only know how to size and place themselves. This module walks
//! a whole tree in the required order: every node is sized after all of its
//! descendants, and placed after its parent has fixed its frame.

use std::rc::Rc;

use super::axis::Axis;
use super::damage::{Damage, DamageLog};
use super::node::{LayoutNode, NodeKind};

/// Bottom-up sizing pass over `node` and its descendants
pub fn perform_sizing(node: &mut LayoutNode) {
    if let NodeKind::Container(c) = &mut node.kind {
        for child in c.children_mut() {
            perform_sizing(child);
        }
        c.do_local_sizing();
    }
}

/// Top-down placement pass. `node`'s own frame must already be final.
pub fn perform_placement(node: &mut LayoutNode) {
    if let NodeKind::Container(c) = &mut node.kind {
        c.complete_local_layout();
        for child in c.children_mut() {
            perform_placement(child);
        }
    }
}

/// Give a root the size nobody else will: its natural size, except on a
/// container's pinned primary axis.
fn fit_root(root: &mut LayoutNode) {
    let pinned_axis = root
        .as_container()
        .and_then(|c| c.is_pinned().then_some(c.axis()));
    let natural = match root.as_container() {
        // a container's cross axis is shrink-wrapped by its own placement
        Some(c) => vec![c.axis()],
        None => vec![Axis::Horizontal, Axis::Vertical],
    };
    for axis in natural {
        if pinned_axis != Some(axis) {
            let size = root.config(axis).natural();
            root.assign_extent(axis, size);
        }
    }
}

/// Size and place a whole tree rooted at `root`
pub fn perform_layout(root: &mut LayoutNode) {
    perform_sizing(root);
    fit_root(root);
    perform_placement(root);
}

/// A tree plus the bookkeeping needed to know when it must be laid out again
pub struct LayoutTree {
    root: LayoutNode,
    damage: Rc<DamageLog>,
    stale: bool,
}

impl LayoutTree {
    pub fn new(mut root: LayoutNode) -> Self {
        let damage = Rc::new(DamageLog::new());
        root.attach_listener(damage.clone());
        Self {
            root,
            damage,
            stale: true,
        }
    }

    pub fn root(&self) -> &LayoutNode {
        &self.root
    }

    /// Mutable access to the root. Setter-driven changes are tracked through
    /// damage; structural edits must be followed by [`LayoutTree::mark_stale`].
    pub fn root_mut(&mut self) -> &mut LayoutNode {
        &mut self.root
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut LayoutNode> {
        self.root.find_mut(id)
    }

    /// Append `child` to the container named `parent`. Returns `false` if no
    /// such container exists.
    pub fn push_child(&mut self, parent: &str, mut child: LayoutNode) -> bool {
        let listener = self.damage.clone();
        let Some(container) = self.root.find_mut(parent).and_then(|n| n.as_container_mut())
        else {
            return false;
        };
        child.attach_listener(listener);
        container.children_mut().push(child);
        self.stale = true;
        true
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale || !self.damage.is_empty()
    }

    /// Lay the tree out if anything changed since the last run. Returns the
    /// damage that triggered the run, or `None` when the tree was up to date.
    pub fn layout(&mut self) -> Option<Vec<Damage>> {
        if !self.is_stale() {
            return None;
        }
        perform_layout(&mut self.root);
        self.stale = false;
        Some(self.damage.drain())
    }
}
