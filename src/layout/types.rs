//! Core types for the layout engine

use serde::Serialize;

use super::axis::{Axis, Justification};
use super::size::SizeConfig;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// The same box shifted by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Type of element in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Box,
    Spring,
    Strut,
    Row,
    Column,
}

impl ElementKind {
    /// Primary axis for containers, `None` for leaves
    pub fn axis(&self) -> Option<Axis> {
        match self {
            ElementKind::Row => Some(Axis::Horizontal),
            ElementKind::Column => Some(Axis::Vertical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Box => "box",
            ElementKind::Spring => "spring",
            ElementKind::Strut => "strut",
            ElementKind::Row => "row",
            ElementKind::Column => "col",
        }
    }
}

/// Layout information for a single element, in absolute coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Justification>,
    pub bounds: BoundingBox,
    pub width: SizeConfig,
    pub height: SizeConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementLayout>,
}

impl ElementLayout {
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Depth-first search for an element by identifier
    pub fn find(&self, id: &str) -> Option<&ElementLayout> {
        if self.id_str() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// The complete result of layout computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Bounding box containing all root elements
    pub bounds: BoundingBox,
    /// Root-level elements in document order
    pub root_elements: Vec<ElementLayout>,
}

impl LayoutResult {
    /// Create an empty layout result
    pub fn new() -> Self {
        Self {
            bounds: BoundingBox::zero(),
            root_elements: Vec::new(),
        }
    }

    /// Look up an element anywhere in the result by identifier
    pub fn get(&self, id: &str) -> Option<&ElementLayout> {
        self.root_elements.iter().find_map(|e| e.find(id))
    }

    /// Recompute the overall bounds from the root elements
    pub fn compute_bounds(&mut self) {
        self.bounds = self
            .root_elements
            .iter()
            .map(|e| e.bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(BoundingBox::zero);
    }
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), Point::new(25.0, 40.0));
        assert!(b.contains(Point::new(10.0, 60.0)));
        assert!(!b.contains(Point::new(9.0, 30.0)));
    }

    #[test]
    fn test_union_and_translate() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = a.translated(20.0, 5.0);
        assert_eq!(b, BoundingBox::new(20.0, 5.0, 10.0, 10.0));
        assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_find_nested() {
        let leaf = ElementLayout {
            id: Some("leaf".to_string()),
            kind: ElementKind::Box,
            justification: None,
            bounds: BoundingBox::new(1.0, 1.0, 2.0, 2.0),
            width: SizeConfig::fixed(2.0),
            height: SizeConfig::fixed(2.0),
            children: vec![],
        };
        let root = ElementLayout {
            id: None,
            kind: ElementKind::Row,
            justification: Some(Justification::Start),
            bounds: BoundingBox::new(0.0, 0.0, 3.0, 3.0),
            width: SizeConfig::fixed(2.0),
            height: SizeConfig::fixed(2.0),
            children: vec![leaf.clone()],
        };
        let mut result = LayoutResult::new();
        result.root_elements.push(root);
        result.compute_bounds();
        assert_eq!(result.get("leaf"), Some(&leaf));
        assert!(result.get("missing").is_none());
        assert_eq!(result.bounds, BoundingBox::new(0.0, 0.0, 3.0, 3.0));
    }

    #[test]
    fn test_kind_axis() {
        assert_eq!(ElementKind::Row.axis(), Some(Axis::Horizontal));
        assert_eq!(ElementKind::Column.axis(), Some(Axis::Vertical));
        assert_eq!(ElementKind::Spring.axis(), None);
    }
}
