//! Axis selection and cross-axis justification
//!
//! Row and column containers run the same algorithm; the only difference is
//! which physical axis is primary. Everything that touches a width or height
//! goes through [`Axis`] so the algorithm never names either directly.

use serde::{Deserialize, Serialize};

use super::types::BoundingBox;

/// A physical layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// x / width
    Horizontal,
    /// y / height
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Size of `bounds` along this axis
    pub fn extent(self, bounds: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => bounds.width,
            Axis::Vertical => bounds.height,
        }
    }

    pub fn set_extent(self, bounds: &mut BoundingBox, value: f64) {
        match self {
            Axis::Horizontal => bounds.width = value,
            Axis::Vertical => bounds.height = value,
        }
    }

    /// Position of `bounds` along this axis
    pub fn offset(self, bounds: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => bounds.x,
            Axis::Vertical => bounds.y,
        }
    }

    pub fn set_offset(self, bounds: &mut BoundingBox, value: f64) {
        match self {
            Axis::Horizontal => bounds.x = value,
            Axis::Vertical => bounds.y = value,
        }
    }

    /// Name of the size property on this axis
    pub fn extent_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }
}

/// Cross-axis alignment of a container's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    /// Top of a row, left of a column
    #[default]
    Start,
    Center,
    /// Bottom of a row, right of a column
    End,
}

impl Justification {
    /// Parse a justification keyword for a container whose cross axis is `cross`.
    ///
    /// `start`/`center`/`end` are accepted on both axes; `top`/`bottom` only
    /// on a vertical cross axis (rows) and `left`/`right` only on a horizontal
    /// one (columns). Anything else falls back to [`Justification::Start`].
    pub fn from_keyword(keyword: &str, cross: Axis) -> Self {
        match (keyword, cross) {
            ("start", _) => Justification::Start,
            ("center", _) => Justification::Center,
            ("end", _) => Justification::End,
            ("top", Axis::Vertical) | ("left", Axis::Horizontal) => Justification::Start,
            ("bottom", Axis::Vertical) | ("right", Axis::Horizontal) => Justification::End,
            (other, _) => {
                log::warn!(
                    "unrecognized justification '{}' on {} axis, using start",
                    other,
                    cross.extent_name()
                );
                Justification::Start
            }
        }
    }

    /// The axis-specific keyword for this justification
    pub fn keyword(self, cross: Axis) -> &'static str {
        match (self, cross) {
            (Justification::Start, Axis::Vertical) => "top",
            (Justification::Start, Axis::Horizontal) => "left",
            (Justification::Center, _) => "center",
            (Justification::End, Axis::Vertical) => "bottom",
            (Justification::End, Axis::Horizontal) => "right",
        }
    }

    /// Cross-axis offset of a child of size `child` inside a container of size `container`
    pub fn offset(self, container: f64, child: f64) -> f64 {
        match self {
            Justification::Start => 0.0,
            Justification::Center => (container - child) / 2.0,
            Justification::End => container - child,
        }
    }
}
