//! Turn a parsed document into layout trees
//!
//! Each top-level statement becomes an independent root. Modifiers are
//! validated here so the layout core only ever sees well-formed
//! [`SizeConfig`]s.

use std::collections::HashMap;

use crate::parser::ast::*;

use super::axis::{Axis, Justification};
use super::config::LayoutConfig;
use super::container::AxisBox;
use super::error::{find_similar, LayoutError};
use super::node::LayoutNode;
use super::size::SizeConfig;

const KNOWN_KEYS: [&str; 7] = [
    "width",
    "height",
    "min_width",
    "max_width",
    "min_height",
    "max_height",
    "justify",
];

/// Build one layout tree per top-level statement
pub fn build(doc: &Document, config: &LayoutConfig) -> Result<Vec<LayoutNode>, LayoutError> {
    let mut builder = TreeBuilder {
        config,
        seen: HashMap::new(),
    };
    let roots = doc
        .statements
        .iter()
        .map(|stmt| builder.statement(stmt, true))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("built {} root tree(s)", roots.len());
    Ok(roots)
}

struct TreeBuilder<'a> {
    config: &'a LayoutConfig,
    seen: HashMap<String, Span>,
}

/// Natural/min/max as written, before defaults are filled in
#[derive(Default)]
struct AxisSpec {
    natural: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl AxisSpec {
    fn resolve(
        &self,
        default: f64,
        element: &str,
        axis: Axis,
        span: &Span,
    ) -> Result<SizeConfig, LayoutError> {
        let natural = self.natural.unwrap_or(default);
        let min = self.min.unwrap_or(natural);
        let max = self.max.unwrap_or(natural);
        SizeConfig::new(natural, min, max).ok_or_else(|| {
            LayoutError::invalid_size(
                element,
                axis.extent_name(),
                format!("need min ({min}) <= natural ({natural}) <= max ({max})"),
                span.clone(),
            )
        })
    }
}

impl TreeBuilder<'_> {
    fn statement(&mut self, stmt: &Spanned<Statement>, is_root: bool) -> Result<LayoutNode, LayoutError> {
        let id = match stmt.node.name() {
            Some(name) => {
                let id = name.node.as_str();
                if let Some(first) = self.seen.get(id) {
                    return Err(LayoutError::duplicate(id, name.span.clone(), first.clone()));
                }
                self.seen.insert(id.to_string(), name.span.clone());
                Some(id)
            }
            None => None,
        };

        let node = match &stmt.node {
            Statement::Item(item) => match item.item_type.node {
                ItemType::Box => self.item(item, &stmt.span)?,
                ItemType::Strut => self.strut(item)?,
                ItemType::Spring => self.spring(item)?,
            },
            Statement::Layout(layout) => self.layout(layout, is_root)?,
        };
        Ok(match id {
            Some(id) => node.with_id(id),
            None => node,
        })
    }

    fn item(&mut self, item: &ItemDecl, span: &Span) -> Result<LayoutNode, LayoutError> {
        let label = display_name(item.name.as_ref(), "box");
        let mut w = AxisSpec::default();
        let mut h = AxisSpec::default();

        for m in &item.modifiers {
            let slot = match &m.node.key.node {
                ModifierKey::Width => &mut w.natural,
                ModifierKey::Height => &mut h.natural,
                ModifierKey::MinWidth => &mut w.min,
                ModifierKey::MinHeight => &mut h.min,
                ModifierKey::MaxWidth => &mut w.max,
                ModifierKey::MaxHeight => &mut h.max,
                ModifierKey::Justify => {
                    return Err(unsupported(m, &label, "only rows and columns justify children"))
                }
                ModifierKey::Custom(key) => return Err(unknown(key, m)),
            };
            *slot = Some(size_value(m)?);
        }

        let (default_w, default_h) = self.config.default_box_size;
        let w_config = w.resolve(default_w, &label, Axis::Horizontal, span)?;
        let h_config = h.resolve(default_h, &label, Axis::Vertical, span)?;
        log::trace!("{label}: width {w_config:?}, height {h_config:?}");
        Ok(LayoutNode::item(w_config, h_config))
    }

    fn strut(&mut self, item: &ItemDecl) -> Result<LayoutNode, LayoutError> {
        let label = display_name(item.name.as_ref(), "strut");
        let (mut width, mut height) = (0.0, 0.0);

        for m in &item.modifiers {
            match &m.node.key.node {
                ModifierKey::Width => width = size_value(m)?,
                ModifierKey::Height => height = size_value(m)?,
                ModifierKey::Custom(key) => return Err(unknown(key, m)),
                _ => return Err(unsupported(m, &label, "struts have a fixed width and height")),
            }
        }
        if width.is_infinite() || height.is_infinite() {
            return Err(LayoutError::invalid_value(
                "width",
                "a finite size for a strut",
                item.item_type.span.clone(),
            ));
        }
        Ok(LayoutNode::strut(width, height))
    }

    fn spring(&mut self, item: &ItemDecl) -> Result<LayoutNode, LayoutError> {
        let label = display_name(item.name.as_ref(), "spring");
        match item.modifiers.first() {
            Some(m) => match &m.node.key.node {
                ModifierKey::Custom(key) => Err(unknown(key, m)),
                _ => Err(unsupported(m, &label, "springs stretch to fill the space they are given")),
            },
            None => Ok(LayoutNode::spring()),
        }
    }

    fn layout(&mut self, layout: &LayoutDecl, is_root: bool) -> Result<LayoutNode, LayoutError> {
        let axis = match layout.layout_type.node {
            LayoutType::Row => Axis::Horizontal,
            LayoutType::Column => Axis::Vertical,
        };
        let kind = match axis {
            Axis::Horizontal => "row",
            Axis::Vertical => "col",
        };
        let label = display_name(layout.name.as_ref(), kind);

        let mut container =
            AxisBox::new(axis).with_justification(self.config.default_justification);
        let mut pin = None;

        for m in &layout.modifiers {
            match &m.node.key.node {
                ModifierKey::Justify => {
                    let keyword = match &m.node.value.node {
                        ModifierValue::Keyword(k) | ModifierValue::String(k) => k.as_str(),
                        ModifierValue::Number(_) => {
                            return Err(LayoutError::invalid_value(
                                "justify",
                                "a keyword such as start, center or end",
                                m.node.value.span.clone(),
                            ))
                        }
                    };
                    container =
                        container.with_justification(Justification::from_keyword(keyword, axis.cross()));
                }
                ModifierKey::Width | ModifierKey::Height => {
                    let key_axis = if m.node.key.node == ModifierKey::Width {
                        Axis::Horizontal
                    } else {
                        Axis::Vertical
                    };
                    if key_axis != axis {
                        return Err(unsupported(
                            m,
                            &label,
                            "the cross-axis size follows the largest child",
                        ));
                    }
                    if !is_root {
                        return Err(unsupported(
                            m,
                            &label,
                            "only top-level containers can set their own size",
                        ));
                    }
                    let value = size_value(m)?;
                    if value.is_infinite() {
                        return Err(LayoutError::invalid_value(
                            axis.extent_name(),
                            "a finite size",
                            m.node.value.span.clone(),
                        ));
                    }
                    pin = Some(value);
                }
                ModifierKey::Custom(key) => return Err(unknown(key, m)),
                _ => {
                    return Err(unsupported(
                        m,
                        &label,
                        "container limits are derived from the children",
                    ))
                }
            }
        }

        for child in &layout.children {
            let node = self.statement(child, false)?;
            container.children_mut().push(node);
        }
        if let Some(value) = pin {
            container.pin_size(value);
        }
        log::trace!(
            "{label}: {} children, justify {:?}",
            container.children().len(),
            container.justification()
        );
        Ok(LayoutNode::container(container))
    }
}

fn display_name(name: Option<&Spanned<Identifier>>, kind: &str) -> String {
    match name {
        Some(n) => format!("{} '{}'", kind, n.node),
        None => kind.to_string(),
    }
}

fn key_name(key: &ModifierKey) -> &str {
    match key {
        ModifierKey::Width => "width",
        ModifierKey::Height => "height",
        ModifierKey::MinWidth => "min_width",
        ModifierKey::MaxWidth => "max_width",
        ModifierKey::MinHeight => "min_height",
        ModifierKey::MaxHeight => "max_height",
        ModifierKey::Justify => "justify",
        ModifierKey::Custom(key) => key,
    }
}

fn unknown(key: &str, m: &Spanned<Modifier>) -> LayoutError {
    LayoutError::unknown_modifier(key, m.node.key.span.clone(), find_similar(KNOWN_KEYS, key, 2))
}

fn unsupported(m: &Spanned<Modifier>, element: &str, reason: &str) -> LayoutError {
    LayoutError::unsupported(key_name(&m.node.key.node), element, reason, m.span.clone())
}

/// A non-negative size, or `unbounded` for a `max_*` key
fn size_value(m: &Spanned<Modifier>) -> Result<f64, LayoutError> {
    let key = &m.node.key.node;
    let is_max = matches!(key, ModifierKey::MaxWidth | ModifierKey::MaxHeight);
    match &m.node.value.node {
        ModifierValue::Number(n) if *n >= 0.0 && n.is_finite() => Ok(*n),
        ModifierValue::Keyword(k) if is_max && k == "unbounded" => Ok(f64::INFINITY),
        _ => Err(LayoutError::invalid_value(
            key_name(key),
            if is_max {
                "a non-negative number or `unbounded`"
            } else {
                "a non-negative number"
            },
            m.node.value.span.clone(),
        )),
    }
}
