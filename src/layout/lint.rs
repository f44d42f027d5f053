//! Lint checks for silently degraded layouts.
//!
//! The layout core never fails: excess space with no spring to absorb it is
//! left at the trailing edge, and a shortfall beyond what the children can
//! give up overflows the container. Both are legal outcomes, so they are
//! reported here as warnings after layout has run.

use std::fmt;

use super::types::{ElementLayout, LayoutResult};

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Unused space along the primary axis
    Gap,
    /// Children extend past the container along the primary axis
    Overflow,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Gap => write!(f, "gap"),
            LintCategory::Overflow => write!(f, "overflow"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a completed layout. Differences up to `tolerance`
/// are ignored.
pub fn check(result: &LayoutResult, tolerance: f64) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for (i, elem) in result.root_elements.iter().enumerate() {
        let name = element_display_name(elem, None, i);
        check_element(elem, &name, tolerance, &mut warnings);
    }
    warnings
}

/// Display name for an element: its ID if named, or positional path if anonymous.
fn element_display_name(elem: &ElementLayout, parent_name: Option<&str>, child_index: usize) -> String {
    match (&elem.id, parent_name) {
        (Some(id), _) => format!("{} \"{}\"", elem.kind.as_str(), id),
        (None, Some(parent)) => format!("<child #{} of {}>", child_index + 1, parent),
        (None, None) => format!("<{} #{}>", elem.kind.as_str(), child_index + 1),
    }
}

fn check_element(elem: &ElementLayout, name: &str, tolerance: f64, warnings: &mut Vec<LintWarning>) {
    if let Some(axis) = elem.kind.axis() {
        if !elem.children.is_empty() {
            let used: f64 = elem.children.iter().map(|c| axis.extent(&c.bounds)).sum();
            let available = axis.extent(&elem.bounds);
            let slack = available - used;
            if slack > tolerance {
                warnings.push(LintWarning {
                    category: LintCategory::Gap,
                    message: format!(
                        "{} leaves {} of {} unused; add a spring to absorb it",
                        name,
                        slack,
                        axis.extent_name()
                    ),
                });
            } else if slack < -tolerance {
                warnings.push(LintWarning {
                    category: LintCategory::Overflow,
                    message: format!(
                        "{} overflows its {} by {}; children cannot shrink any further",
                        name,
                        axis.extent_name(),
                        -slack
                    ),
                });
            }
        }
    }

    for (i, child) in elem.children.iter().enumerate() {
        let child_name = element_display_name(child, Some(name), i);
        check_element(child, &child_name, tolerance, warnings);
    }
}
