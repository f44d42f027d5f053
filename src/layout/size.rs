//! Per-axis sizing constraints

use serde::Serialize;

/// Sizing constraints of an element along one axis.
///
/// Always satisfies `0 <= min <= natural <= max`. The value is immutable: a
/// container that needs different constraints builds a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeConfig {
    natural: f64,
    min: f64,
    max: f64,
}

impl SizeConfig {
    /// All-zero constraints, the aggregate of an empty container
    pub const ZERO: SizeConfig = SizeConfig {
        natural: 0.0,
        min: 0.0,
        max: 0.0,
    };

    /// Build a config, returning `None` unless `0 <= min <= natural <= max`
    pub fn new(natural: f64, min: f64, max: f64) -> Option<Self> {
        let ordered = 0.0 <= min && min <= natural && natural <= max;
        // NaN fails every comparison above
        ordered.then_some(Self { natural, min, max })
    }

    /// Rigid size: `(v, v, v)`
    pub fn fixed(v: f64) -> Self {
        Self {
            natural: v,
            min: v,
            max: v,
        }
    }

    /// Fully flexible size: `(v, 0, +inf)`
    pub fn elastic(v: f64) -> Self {
        Self {
            natural: v,
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn natural(&self) -> f64 {
        self.natural
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// How far the element can shrink below its natural size
    pub fn compressibility(&self) -> f64 {
        self.natural - self.min
    }

    pub fn is_bounded(&self) -> bool {
        self.max.is_finite()
    }

    /// Component-wise sum; an unbounded max stays unbounded
    pub fn stacked(self, other: SizeConfig) -> SizeConfig {
        SizeConfig {
            natural: self.natural + other.natural,
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }

    /// Component-wise maximum
    pub fn widest(self, other: SizeConfig) -> SizeConfig {
        SizeConfig {
            natural: self.natural.max(other.natural),
            min: self.min.max(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self::ZERO
    }
}
