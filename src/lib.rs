//! Springbox - one-dimensional box layout with springs and struts
//!
//! This library provides a parser for a small box-tree language and a layout
//! engine in which rows and columns share out space along their primary axis:
//! springs absorb excess, compressible elements give up space under shortfall,
//! and children are justified on the cross axis.
//!
//! # Example
//!
//! ```rust
//! use springbox::layout_source;
//!
//! let result = layout_source(r#"
//!     row main [width: 100] {
//!         strut [width: 20]
//!         spring
//!         box a [width: 30, height: 10]
//!     }
//! "#).unwrap();
//!
//! assert_eq!(result.get("a").unwrap().bounds.x, 70.0);
//! ```

pub mod error;
pub mod layout;
pub mod parser;

pub use error::ParseError;
pub use layout::lint::{LintCategory, LintWarning};
pub use layout::{LayoutConfig, LayoutError, LayoutResult};
pub use parser::{parse, Document};

use thiserror::Error;

/// Errors that can occur between source text and a finished layout
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while building the layout tree
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

impl RunError {
    /// Render the error with source context, one report per underlying error
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Layout(e) => e.format(source, filename),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lay out DSL source with default configuration
pub fn layout_source(source: &str) -> Result<LayoutResult, RunError> {
    layout_with_config(source, &LayoutConfig::default())
}

/// Lay out DSL source with custom configuration
///
/// # Example
///
/// ```rust
/// use springbox::{layout_with_config, LayoutConfig};
///
/// let config = LayoutConfig::default().with_box_size(10.0, 10.0);
/// let result = layout_with_config("col { box a box b }", &config).unwrap();
/// assert_eq!(result.get("b").unwrap().bounds.y, 10.0);
/// ```
pub fn layout_with_config(source: &str, config: &LayoutConfig) -> Result<LayoutResult, RunError> {
    let doc = parse(source)?;
    let result = layout::compute(&doc, config)?;
    Ok(result)
}

/// Lay out DSL source and run the lint checks on the result
pub fn layout_with_lint(
    source: &str,
    config: &LayoutConfig,
) -> Result<(LayoutResult, Vec<LintWarning>), RunError> {
    let result = layout_with_config(source, config)?;
    let warnings = layout::lint::check(&result, config.tolerance);
    Ok((result, warnings))
}
