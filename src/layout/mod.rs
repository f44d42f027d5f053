//! Layout engine for computing element positions and sizes
//!
//! Rows and columns negotiate space along their primary axis with springs
//! and struts, then place their children contiguously and justify them on
//! the cross axis. This module takes a parsed AST and produces a
//! [`LayoutResult`] with every element in absolute coordinates.

pub mod axis;
pub mod builder;
pub mod config;
pub mod container;
pub mod damage;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lint;
pub mod node;
pub mod size;
pub mod types;

pub use axis::{Axis, Justification};
pub use config::{ConfigError, LayoutConfig};
pub use container::AxisBox;
pub use damage::{Damage, DamageCause, DamageListener, DamageLog};
pub use driver::{perform_layout, LayoutTree};
pub use engine::{compute, format_tree, snapshot, to_toml};
pub use error::LayoutError;
pub use node::{ChildRole, LayoutNode};
pub use size::SizeConfig;
pub use types::*;
