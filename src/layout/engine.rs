//! Layout computation engine
//!
//! Builds one tree per top-level statement, runs the two-pass layout on
//! each, and flattens the result into absolute coordinates.
//!
//! ## Key Functions
//!
//! - [`compute`]: Main entry point for layout computation
//! - [`snapshot`]: Capture a laid-out tree as an [`ElementLayout`]
//! - [`format_tree`]: Plain-text dump of a result
//! - [`to_toml`]: TOML rendering of a result

use std::fmt::Write;

use crate::parser::ast::Document;

use super::axis::{Axis, Justification};
use super::builder::build;
use super::config::LayoutConfig;
use super::driver::perform_layout;
use super::error::LayoutError;
use super::node::LayoutNode;
use super::types::*;

/// Compute the layout for a document
pub fn compute(doc: &Document, config: &LayoutConfig) -> Result<LayoutResult, LayoutError> {
    let roots = build(doc, config)?;

    let mut result = LayoutResult::new();
    let mut y = 0.0;
    for mut root in roots {
        perform_layout(&mut root);
        let element = snapshot_at(&root, 0.0, y);
        log::debug!(
            "laid out {} at y={}: {}x{}",
            element.id_str().unwrap_or(element.kind.as_str()),
            y,
            element.bounds.width,
            element.bounds.height
        );
        y = element.bounds.bottom() + config.root_spacing;
        result.root_elements.push(element);
    }

    result.compute_bounds();
    Ok(result)
}

/// Capture a laid-out tree with the root's frame as the absolute origin
pub fn snapshot(root: &LayoutNode) -> ElementLayout {
    snapshot_at(root, 0.0, 0.0)
}

/// Convert `node` to absolute coordinates; `(ox, oy)` is its parent's origin
fn snapshot_at(node: &LayoutNode, ox: f64, oy: f64) -> ElementLayout {
    let bounds = node.frame().translated(ox, oy);
    let children = node
        .children()
        .iter()
        .map(|child| snapshot_at(child, bounds.x, bounds.y))
        .collect();

    ElementLayout {
        id: node.id.clone(),
        kind: node.element_kind(),
        justification: node.as_container().map(|c| c.justification()),
        bounds,
        width: node.config(Axis::Horizontal),
        height: node.config(Axis::Vertical),
        children,
    }
}

/// Render a result as an indented text tree, one element per line
pub fn format_tree(result: &LayoutResult) -> String {
    let mut out = String::new();
    for element in &result.root_elements {
        write_element(&mut out, element, 0);
    }
    out
}

fn write_element(out: &mut String, element: &ElementLayout, depth: usize) {
    let b = &element.bounds;
    let _ = write!(out, "{}{}", "  ".repeat(depth), element.kind.as_str());
    if let Some(id) = element.id_str() {
        let _ = write!(out, " {}", id);
    }
    let _ = write!(
        out,
        " x={} y={} w={} h={}",
        fmt_num(b.x),
        fmt_num(b.y),
        fmt_num(b.width),
        fmt_num(b.height)
    );
    if let (Some(j), Some(axis)) = (element.justification, element.kind.axis()) {
        if j != Justification::Start {
            let _ = write!(out, " justify={}", j.keyword(axis.cross()));
        }
    }
    out.push('\n');
    for child in &element.children {
        write_element(out, child, depth + 1);
    }
}

/// Up to three decimals, trailing zeros dropped
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Render a result as a TOML document
pub fn to_toml(result: &LayoutResult) -> Result<String, toml::ser::Error> {
    toml::to_string(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn compute_str(source: &str) -> LayoutResult {
        let doc = parse(source).unwrap();
        compute(&doc, &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_layout_single_box() {
        let result = compute_str("box server");
        assert_eq!(result.root_elements.len(), 1);
        assert_eq!(result.root_elements[0].bounds, BoundingBox::new(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_layout_row() {
        let result = compute_str("row { box a box b }");
        let container = &result.root_elements[0];
        assert_eq!(container.children.len(), 2);
        assert_eq!(container.children[1].bounds.x, container.children[0].bounds.right());
        assert_eq!(container.bounds.width, 80.0);
    }

    #[test]
    fn test_absolute_coordinates() {
        let result = compute_str(
            "row [width: 100, justify: bottom] { strut [width: 30] col c { box a [height: 5] box b [height: 5] } }",
        );
        let b = result.get("b").unwrap();
        // col sits after the 30-wide strut; b is the second child of the column
        assert_eq!(b.bounds, BoundingBox::new(30.0, 5.0, 40.0, 5.0));
        assert_eq!(result.get("c").unwrap().bounds.y, 0.0);
    }

    #[test]
    fn test_roots_are_stacked() {
        let doc = parse("box a box b").unwrap();
        let config = LayoutConfig::default().with_root_spacing(5.0);
        let result = compute(&doc, &config).unwrap();
        assert_eq!(result.get("b").unwrap().bounds.y, 25.0);
        assert_eq!(result.bounds, BoundingBox::new(0.0, 0.0, 40.0, 45.0));
    }

    #[test]
    fn test_layout_error_propagates() {
        let doc = parse("box a box a").unwrap();
        assert!(matches!(
            compute(&doc, &LayoutConfig::default()),
            Err(LayoutError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(20.0), "20");
        assert_eq!(fmt_num(4.4), "4.4");
        assert_eq!(fmt_num(6.800000000001), "6.8");
        assert_eq!(fmt_num(-0.0), "0");
    }

    #[test]
    fn test_format_tree_marks_justification() {
        let text = format_tree(&compute_str("col side [justify: right] { box a }"));
        assert_eq!(
            text,
            "col side x=0 y=0 w=40 h=20 justify=right\n  box a x=0 y=0 w=40 h=20\n"
        );
    }

    #[test]
    fn test_to_toml() {
        let toml = to_toml(&compute_str("row main { spring }")).unwrap();
        assert!(toml.contains("kind = \"row\""));
        assert!(toml.contains("id = \"main\""));
        assert!(toml.contains("kind = \"spring\""));
    }
}
