//! Layout tree nodes
//!
//! A container only ever talks to its children through this contract: it
//! reads their per-axis [`SizeConfig`]s and their [`ChildRole`], and writes
//! their frame during placement.

use std::rc::Rc;

use super::axis::Axis;
use super::container::AxisBox;
use super::damage::DamageListener;
use super::size::SizeConfig;
use super::types::{BoundingBox, ElementKind};

/// How a child takes part in primary-axis negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
    /// Zero-natural filler: absorbs excess, zeroed first under shortfall
    Spring,
    /// Fixed filler: keeps its natural size, nothing to compress
    Strut,
    /// Anything else, compressed proportionally down to its minimum
    Other,
}

/// A leaf with fixed per-axis constraints
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    frame: BoundingBox,
    w_config: SizeConfig,
    h_config: SizeConfig,
}

impl Element {
    pub fn new(w_config: SizeConfig, h_config: SizeConfig) -> Self {
        Self {
            frame: BoundingBox::new(0.0, 0.0, w_config.natural(), h_config.natural()),
            w_config,
            h_config,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Item(Element),
    Spring(Element),
    Strut(Element),
    Container(AxisBox),
}

/// A node of the layout tree
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: Option<String>,
    pub kind: NodeKind,
}

impl LayoutNode {
    /// An ordinary element with the given constraints
    pub fn item(w_config: SizeConfig, h_config: SizeConfig) -> Self {
        Self::from_kind(NodeKind::Item(Element::new(w_config, h_config)))
    }

    pub fn spring() -> Self {
        Self::from_kind(NodeKind::Spring(Element::new(
            SizeConfig::elastic(0.0),
            SizeConfig::elastic(0.0),
        )))
    }

    pub fn strut(width: f64, height: f64) -> Self {
        Self::from_kind(NodeKind::Strut(Element::new(
            SizeConfig::fixed(width),
            SizeConfig::fixed(height),
        )))
    }

    pub fn container(container: AxisBox) -> Self {
        Self::from_kind(NodeKind::Container(container))
    }

    fn from_kind(kind: NodeKind) -> Self {
        Self { id: None, kind }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn role(&self) -> ChildRole {
        match self.kind {
            NodeKind::Spring(_) => ChildRole::Spring,
            NodeKind::Strut(_) => ChildRole::Strut,
            NodeKind::Item(_) | NodeKind::Container(_) => ChildRole::Other,
        }
    }

    pub fn element_kind(&self) -> ElementKind {
        match &self.kind {
            NodeKind::Item(_) => ElementKind::Box,
            NodeKind::Spring(_) => ElementKind::Spring,
            NodeKind::Strut(_) => ElementKind::Strut,
            NodeKind::Container(c) => match c.axis() {
                Axis::Horizontal => ElementKind::Row,
                Axis::Vertical => ElementKind::Column,
            },
        }
    }

    /// Frame relative to the parent container
    pub fn frame(&self) -> &BoundingBox {
        match &self.kind {
            NodeKind::Item(e) | NodeKind::Spring(e) | NodeKind::Strut(e) => &e.frame,
            NodeKind::Container(c) => c.frame(),
        }
    }

    /// Sizing constraints along `axis`
    pub fn config(&self, axis: Axis) -> SizeConfig {
        match &self.kind {
            NodeKind::Item(e) | NodeKind::Spring(e) | NodeKind::Strut(e) => match axis {
                Axis::Horizontal => e.w_config,
                Axis::Vertical => e.h_config,
            },
            NodeKind::Container(c) => c.config(axis),
        }
    }

    /// Set the size along `axis` as decided by the parent. No damage is raised.
    pub(crate) fn assign_extent(&mut self, axis: Axis, value: f64) {
        match &mut self.kind {
            NodeKind::Item(e) | NodeKind::Spring(e) | NodeKind::Strut(e) => {
                axis.set_extent(&mut e.frame, value)
            }
            NodeKind::Container(c) => c.assign_extent(axis, value),
        }
    }

    /// Set the position along `axis` as decided by the parent. No damage is raised.
    pub(crate) fn assign_offset(&mut self, axis: Axis, value: f64) {
        match &mut self.kind {
            NodeKind::Item(e) | NodeKind::Spring(e) | NodeKind::Strut(e) => {
                axis.set_offset(&mut e.frame, value)
            }
            NodeKind::Container(c) => c.assign_offset(axis, value),
        }
    }

    pub fn as_container(&self) -> Option<&AxisBox> {
        match &self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut AxisBox> {
        match &mut self.kind {
            NodeKind::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Children in order; empty for leaves
    pub fn children(&self) -> &[LayoutNode] {
        match &self.kind {
            NodeKind::Container(c) => c.children(),
            _ => &[],
        }
    }

    /// Depth-first search by identifier
    pub fn find_mut(&mut self, id: &str) -> Option<&mut LayoutNode> {
        if self.id_str() == Some(id) {
            return Some(self);
        }
        match &mut self.kind {
            NodeKind::Container(c) => c.children_mut().iter_mut().find_map(|n| n.find_mut(id)),
            _ => None,
        }
    }

    /// Attach a damage listener to every container in this subtree
    pub fn attach_listener(&mut self, listener: Rc<dyn DamageListener>) {
        if let NodeKind::Container(c) = &mut self.kind {
            for child in c.children_mut() {
                child.attach_listener(Rc::clone(&listener));
            }
            c.set_listener(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        assert_eq!(LayoutNode::spring().role(), ChildRole::Spring);
        assert_eq!(LayoutNode::strut(5.0, 0.0).role(), ChildRole::Strut);
        let item = LayoutNode::item(SizeConfig::fixed(1.0), SizeConfig::fixed(1.0));
        assert_eq!(item.role(), ChildRole::Other);
        assert_eq!(
            LayoutNode::container(AxisBox::row()).role(),
            ChildRole::Other
        );
    }

    #[test]
    fn test_filler_configs() {
        let spring = LayoutNode::spring();
        assert_eq!(spring.config(Axis::Horizontal), SizeConfig::elastic(0.0));
        assert_eq!(spring.config(Axis::Vertical), SizeConfig::elastic(0.0));

        let strut = LayoutNode::strut(20.0, 4.0);
        assert_eq!(strut.config(Axis::Horizontal), SizeConfig::fixed(20.0));
        assert_eq!(strut.config(Axis::Vertical), SizeConfig::fixed(4.0));
        assert_eq!(strut.frame(), &BoundingBox::new(0.0, 0.0, 20.0, 4.0));
    }

    #[test]
    fn test_assign_frame() {
        let mut node = LayoutNode::item(SizeConfig::fixed(3.0), SizeConfig::fixed(4.0));
        node.assign_extent(Axis::Horizontal, 9.0);
        node.assign_offset(Axis::Vertical, 2.0);
        assert_eq!(node.frame(), &BoundingBox::new(0.0, 2.0, 9.0, 4.0));
        // constraints are untouched by placement
        assert_eq!(node.config(Axis::Horizontal), SizeConfig::fixed(3.0));
    }

    #[test]
    fn test_find_mut() {
        let inner = LayoutNode::container(AxisBox::column().with_child(LayoutNode::spring().with_id("s")))
            .with_id("inner");
        let mut root = LayoutNode::container(AxisBox::row().with_child(inner)).with_id("root");
        assert!(root.find_mut("s").is_some());
        assert_eq!(root.find_mut("inner").map(|n| n.element_kind()), Some(ElementKind::Column));
        assert!(root.find_mut("nope").is_none());
    }
}
