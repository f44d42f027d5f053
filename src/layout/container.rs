//! Springs-and-struts box container
//!
//! [`AxisBox`] stacks its children along one primary axis and aligns them on
//! the cross axis. Rows and columns are the same type with a different
//! [`Axis`]; the algorithm is written once in terms of "primary" and "cross".
//!
//! Layout runs in two passes driven from outside (see [`super::driver`]):
//!
//! 1. **Sizing**, bottom-up: [`AxisBox::do_local_sizing`] aggregates the
//!    children's constraints into the container's own.
//! 2. **Placement**, top-down: once the container's own size is final,
//!    [`AxisBox::complete_local_layout`] sizes and positions every child.
//!
//! Space along the primary axis is negotiated against the children's natural
//! sizes. Surplus goes to springs in equal shares; a deficit first zeroes the
//! springs and then compresses the other children in proportion to how far
//! each can shrink. Neither case is an error: surplus without springs and
//! deficit beyond what the children can yield are left at the trailing edge.

use std::fmt;
use std::rc::Rc;

use super::axis::{Axis, Justification};
use super::damage::{Damage, DamageCause, DamageListener};
use super::node::{ChildRole, LayoutNode};
use super::size::SizeConfig;
use super::types::BoundingBox;

/// Primary-axis totals over a container's children
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// Sum of natural sizes of every non-spring child
    pub nat_sum: f64,
    /// Sum of `natural - min` of every non-spring child
    pub avail_compr: f64,
    pub num_springs: usize,
}

#[derive(Clone)]
pub struct AxisBox {
    axis: Axis,
    frame: BoundingBox,
    w_config: SizeConfig,
    h_config: SizeConfig,
    justification: Justification,
    pinned: bool,
    children: Vec<LayoutNode>,
    listener: Option<Rc<dyn DamageListener>>,
}

impl AxisBox {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            frame: BoundingBox::zero(),
            w_config: SizeConfig::ZERO,
            h_config: SizeConfig::ZERO,
            justification: Justification::default(),
            pinned: false,
            children: Vec::new(),
            listener: None,
        }
    }

    /// Container stacking children left to right
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Container stacking children top to bottom
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Initial position and size
    pub fn with_frame(mut self, frame: BoundingBox) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn frame(&self) -> &BoundingBox {
        &self.frame
    }

    pub fn width(&self) -> f64 {
        self.frame.width
    }

    pub fn height(&self) -> f64 {
        self.frame.height
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn w_config(&self) -> SizeConfig {
        self.w_config
    }

    pub fn h_config(&self) -> SizeConfig {
        self.h_config
    }

    pub fn config(&self, axis: Axis) -> SizeConfig {
        match axis {
            Axis::Horizontal => self.w_config,
            Axis::Vertical => self.h_config,
        }
    }

    fn replace_config(&mut self, axis: Axis, config: SizeConfig) {
        match axis {
            Axis::Horizontal => self.w_config = config,
            Axis::Vertical => self.h_config = config,
        }
    }

    /// Whether the primary-axis size was set explicitly
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    /// Mutable access to the child list. Callers must have the tree laid out
    /// again afterwards.
    pub fn children_mut(&mut self) -> &mut Vec<LayoutNode> {
        &mut self.children
    }

    pub fn set_listener(&mut self, listener: Rc<dyn DamageListener>) {
        self.listener = Some(listener);
    }

    fn notify(&self, cause: DamageCause) {
        if let Some(listener) = &self.listener {
            listener.damaged(Damage::new(self.frame, cause));
        }
    }

    /// Move the container; damages both the old and new regions
    pub fn set_position(&mut self, x: f64, y: f64) {
        if self.frame.x == x && self.frame.y == y {
            return;
        }
        self.notify(DamageCause::Moved);
        self.frame.x = x;
        self.frame.y = y;
        self.notify(DamageCause::Moved);
    }

    /// Change the cross-axis alignment of the children
    pub fn set_justification(&mut self, justification: Justification) {
        if self.justification == justification {
            return;
        }
        self.justification = justification;
        self.notify(DamageCause::Justified);
    }

    /// Set the size along `axis`.
    ///
    /// On the primary axis this pins the container: its constraints on that
    /// axis become `fixed(value)` and damage is raised before and after the
    /// change. On the cross axis the value is only stored; placement
    /// shrink-wraps it again.
    pub fn set_size(&mut self, axis: Axis, value: f64) {
        if axis.extent(&self.frame) == value {
            return;
        }
        if axis != self.axis {
            axis.set_extent(&mut self.frame, value);
            return;
        }
        self.notify(DamageCause::Resized);
        axis.set_extent(&mut self.frame, value);
        self.replace_config(axis, SizeConfig::fixed(value));
        self.pinned = true;
        self.notify(DamageCause::Resized);
    }

    /// Pin the primary-axis size at `value`, even when the frame already
    /// has that size. Damage is only raised if the size actually changes.
    pub fn pin_size(&mut self, value: f64) {
        self.set_size(self.axis, value);
        self.replace_config(self.axis, SizeConfig::fixed(value));
        self.pinned = true;
    }

    pub fn set_width(&mut self, width: f64) {
        self.set_size(Axis::Horizontal, width);
    }

    pub fn set_height(&mut self, height: f64) {
        self.set_size(Axis::Vertical, height);
    }

    pub(crate) fn assign_extent(&mut self, axis: Axis, value: f64) {
        axis.set_extent(&mut self.frame, value);
    }

    pub(crate) fn assign_offset(&mut self, axis: Axis, value: f64) {
        axis.set_offset(&mut self.frame, value);
    }

    /// Sizing pass: derive this container's constraints from its children.
    ///
    /// The primary axis sums the children, the cross axis takes the
    /// component-wise maximum. Every child must already be sized.
    pub fn do_local_sizing(&mut self) {
        let primary = self.axis;
        let cross = primary.cross();

        let (along, across) = self.children.iter().fold(
            (SizeConfig::ZERO, SizeConfig::ZERO),
            |(along, across), child| {
                (
                    along.stacked(child.config(primary)),
                    across.widest(child.config(cross)),
                )
            },
        );

        self.replace_config(primary, along);
        self.replace_config(cross, across);
        log::trace!(
            "sized {:?} box: primary {:?}, cross {:?}",
            primary,
            along,
            across
        );
    }

    /// Totals used to negotiate primary-axis space. Pure read.
    pub fn measure_children(&self) -> Measurement {
        let primary = self.axis;
        self.children
            .iter()
            .fold(Measurement::default(), |mut m, child| {
                match child.role() {
                    ChildRole::Spring => m.num_springs += 1,
                    ChildRole::Strut | ChildRole::Other => {
                        let config = child.config(primary);
                        m.nat_sum += config.natural();
                        m.avail_compr += config.compressibility();
                    }
                }
                m
            })
    }

    /// Assign every child's primary-axis size from this container's own size.
    pub fn adjust_children(&mut self) {
        let primary = self.axis;
        let m = self.measure_children();
        let excess = primary.extent(&self.frame) - m.nat_sum;

        for child in &mut self.children {
            if child.role() != ChildRole::Spring {
                let natural = child.config(primary).natural();
                child.assign_extent(primary, natural);
            }
        }

        if excess >= 0.0 {
            if m.num_springs == 0 && excess > 0.0 {
                log::debug!("no spring to absorb {:.3} of {}", excess, primary.extent_name());
            }
            self.expand_child_springs(excess, m.num_springs);
            return;
        }

        for child in &mut self.children {
            if child.role() == ChildRole::Spring {
                child.assign_extent(primary, 0.0);
            }
        }

        if m.avail_compr <= 0.0 {
            log::debug!(
                "nothing to compress, {} overflows by {:.3}",
                primary.extent_name(),
                -excess
            );
            return;
        }

        let shortfall = m.avail_compr.min(-excess);
        if shortfall < -excess {
            log::debug!(
                "compression exhausted, {} overflows by {:.3}",
                primary.extent_name(),
                -excess - shortfall
            );
        }
        self.compress_children(shortfall, m.avail_compr);
    }

    /// Split `excess` evenly between the springs
    pub fn expand_child_springs(&mut self, excess: f64, num_springs: usize) {
        if num_springs == 0 {
            return;
        }
        let primary = self.axis;
        let share = excess / num_springs as f64;
        for child in &mut self.children {
            if child.role() == ChildRole::Spring {
                child.assign_extent(primary, share);
            }
        }
    }

    /// Shrink the non-spring children by `shortfall` in total, each in
    /// proportion to its share of `avail_compr`.
    pub fn compress_children(&mut self, shortfall: f64, avail_compr: f64) {
        if avail_compr <= 0.0 {
            return;
        }
        let primary = self.axis;
        for child in &mut self.children {
            if child.role() == ChildRole::Spring {
                continue;
            }
            let config = child.config(primary);
            let yielded = config.compressibility() / avail_compr * shortfall;
            let size = (config.natural() - yielded).max(config.min());
            log::trace!("compressed child from {:.3} to {:.3}", config.natural(), size);
            child.assign_extent(primary, size);
        }
    }

    /// Placement pass: size and position every child. This container's own
    /// primary-axis size must already be final.
    pub fn complete_local_layout(&mut self) {
        if self.children.is_empty() {
            return;
        }

        self.adjust_children();

        let primary = self.axis;
        let cross = primary.cross();

        let mut cross_size = 0.0f64;
        for child in &mut self.children {
            let natural = child.config(cross).natural();
            child.assign_extent(cross, natural);
            cross_size = cross_size.max(natural);
        }
        cross.set_extent(&mut self.frame, cross_size);

        let mut offset = 0.0;
        for child in &mut self.children {
            child.assign_offset(primary, offset);
            offset += primary.extent(child.frame());

            let child_cross = cross.extent(child.frame());
            child.assign_offset(cross, self.justification.offset(cross_size, child_cross));
        }

        log::debug!(
            "placed {} children along {}: used {:.3} of {:.3}",
            self.children.len(),
            primary.extent_name(),
            offset,
            primary.extent(&self.frame)
        );
    }
}

impl fmt::Debug for AxisBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBox")
            .field("axis", &self.axis)
            .field("frame", &self.frame)
            .field("w_config", &self.w_config)
            .field("h_config", &self.h_config)
            .field("justification", &self.justification)
            .field("pinned", &self.pinned)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::damage::DamageLog;

    fn item(natural: f64, min: f64) -> LayoutNode {
        LayoutNode::item(
            SizeConfig::new(natural, min, natural).unwrap(),
            SizeConfig::fixed(10.0),
        )
    }

    fn widths(container: &AxisBox) -> Vec<f64> {
        container.children().iter().map(|c| c.frame().width).collect()
    }

    fn xs(container: &AxisBox) -> Vec<f64> {
        container.children().iter().map(|c| c.frame().x).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_sizing_sums_primary_and_maxes_cross() {
        let mut row = AxisBox::row()
            .with_child(LayoutNode::item(
                SizeConfig::new(8.0, 2.0, 9.0).unwrap(),
                SizeConfig::new(5.0, 1.0, 6.0).unwrap(),
            ))
            .with_child(LayoutNode::item(
                SizeConfig::new(4.0, 4.0, 7.0).unwrap(),
                SizeConfig::new(3.0, 2.0, 12.0).unwrap(),
            ));
        row.do_local_sizing();
        assert_eq!(row.w_config(), SizeConfig::new(12.0, 6.0, 16.0).unwrap());
        assert_eq!(row.h_config(), SizeConfig::new(5.0, 2.0, 12.0).unwrap());
    }

    #[test]
    fn test_sizing_with_spring_is_unbounded() {
        let mut col = AxisBox::column()
            .with_child(LayoutNode::strut(3.0, 7.0))
            .with_child(LayoutNode::spring());
        col.do_local_sizing();
        assert_eq!(col.h_config().natural(), 7.0);
        assert_eq!(col.h_config().min(), 7.0);
        assert!(!col.h_config().is_bounded());
        assert_eq!(col.w_config().natural(), 3.0);
    }

    #[test]
    fn test_sizing_empty_is_zero() {
        let mut row = AxisBox::row();
        row.do_local_sizing();
        assert_eq!(row.w_config(), SizeConfig::ZERO);
        assert_eq!(row.h_config(), SizeConfig::ZERO);
    }

    #[test]
    fn test_measure_excludes_springs() {
        let row = AxisBox::row()
            .with_child(item(8.0, 2.0))
            .with_child(LayoutNode::spring())
            .with_child(LayoutNode::strut(5.0, 0.0))
            .with_child(LayoutNode::spring());
        assert_eq!(
            row.measure_children(),
            Measurement {
                nat_sum: 13.0,
                avail_compr: 6.0,
                num_springs: 2
            }
        );
    }

    #[test]
    fn test_struts_and_spring_fill_row() {
        let mut row = AxisBox::row()
            .with_child(LayoutNode::strut(20.0, 0.0))
            .with_child(LayoutNode::spring())
            .with_child(LayoutNode::strut(20.0, 0.0));
        row.do_local_sizing();
        row.set_width(100.0);
        row.complete_local_layout();
        assert_eq!(widths(&row), vec![20.0, 60.0, 20.0]);
        assert_eq!(xs(&row), vec![0.0, 20.0, 80.0]);
        assert_eq!(row.height(), 0.0);
    }

    #[test]
    fn test_excess_split_evenly_between_springs() {
        let mut row = AxisBox::row()
            .with_child(LayoutNode::spring())
            .with_child(item(10.0, 10.0))
            .with_child(LayoutNode::spring())
            .with_child(LayoutNode::spring());
        row.do_local_sizing();
        row.set_width(40.0);
        row.complete_local_layout();
        assert_eq!(widths(&row), vec![10.0, 10.0, 10.0, 10.0]);
        assert_eq!(xs(&row), vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_excess_without_springs_left_at_trailing_edge() {
        let mut row = AxisBox::row()
            .with_child(item(5.0, 5.0))
            .with_child(item(8.0, 8.0));
        row.do_local_sizing();
        row.set_width(23.0);
        row.complete_local_layout();
        assert_eq!(widths(&row), vec![5.0, 8.0]);
        assert_eq!(xs(&row), vec![0.0, 5.0]);
        assert_eq!(row.width(), 23.0);
    }

    #[test]
    fn test_proportional_compression() {
        let mut row = AxisBox::row()
            .with_child(item(8.0, 2.0))
            .with_child(item(8.0, 4.0));
        row.do_local_sizing();
        row.set_width(10.0);
        row.complete_local_layout();
        let w = widths(&row);
        // compressibilities 6 and 4 share a shortfall of 6
        assert_close(w[0], 4.4);
        assert_close(w[1], 5.6);
        assert_close(row.children()[1].frame().x, 4.4);
        assert_close(w.iter().sum(), 10.0);
    }

    #[test]
    fn test_compression_conserves_shortfall() {
        let configs = [
            SizeConfig::new(12.0, 3.0, 12.0).unwrap(),
            SizeConfig::fixed(7.0),
            SizeConfig::new(9.0, 8.0, 20.0).unwrap(),
            SizeConfig::new(5.0, 0.0, f64::INFINITY).unwrap(),
        ];
        let mut row = AxisBox::row().with_child(LayoutNode::spring());
        for c in configs {
            row.children_mut().push(LayoutNode::item(c, SizeConfig::fixed(1.0)));
        }
        row.children_mut().push(LayoutNode::strut(4.0, 0.0));
        row.do_local_sizing();

        // natural 37, compressibility 15
        for width in [36.0, 30.0, 22.0] {
            row.set_width(width);
            row.complete_local_layout();
            let shortfall = 37.0 - width;
            let given_up: f64 = row
                .children()
                .iter()
                .filter(|c| c.role() != ChildRole::Spring)
                .map(|c| c.config(Axis::Horizontal).natural() - c.frame().width)
                .sum();
            assert_close(given_up, shortfall);
            assert_close(row.children()[0].frame().width, 0.0);
            for child in row.children() {
                assert!(child.frame().width >= child.config(Axis::Horizontal).min() - 1e-9);
            }
            assert_close(widths(&row).iter().sum(), width);
        }
    }

    #[test]
    fn test_shortfall_zeroes_springs_first() {
        let mut row = AxisBox::row()
            .with_child(item(10.0, 0.0))
            .with_child(LayoutNode::spring())
            .with_child(item(10.0, 0.0));
        row.do_local_sizing();
        row.set_width(16.0);
        row.complete_local_layout();
        let w = widths(&row);
        assert_close(w[0], 8.0);
        assert_eq!(w[1], 0.0);
        assert_close(w[2], 8.0);
        assert_close(row.children()[2].frame().x, 8.0);
    }

    #[test]
    fn test_shortfall_beyond_compressibility_clamps_at_min() {
        let mut row = AxisBox::row()
            .with_child(item(10.0, 6.0))
            .with_child(item(10.0, 8.0));
        row.do_local_sizing();
        row.set_width(5.0);
        row.complete_local_layout();
        let w = widths(&row);
        assert_close(w[0], 6.0);
        assert_close(w[1], 8.0);
    }

    #[test]
    fn test_shortfall_without_compressibility_keeps_naturals() {
        let mut row = AxisBox::row()
            .with_child(LayoutNode::strut(10.0, 1.0))
            .with_child(LayoutNode::spring())
            .with_child(LayoutNode::strut(10.0, 1.0));
        row.do_local_sizing();
        row.set_width(12.0);
        row.complete_local_layout();
        assert_eq!(widths(&row), vec![10.0, 0.0, 10.0]);
        assert_eq!(xs(&row), vec![0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_column_center_justification() {
        let mut col = AxisBox::column()
            .with_justification(Justification::Center)
            .with_child(LayoutNode::item(SizeConfig::fixed(20.0), SizeConfig::fixed(5.0)))
            .with_child(LayoutNode::item(SizeConfig::fixed(50.0), SizeConfig::fixed(5.0)));
        col.do_local_sizing();
        col.set_height(10.0);
        col.complete_local_layout();
        assert_eq!(col.width(), 50.0);
        assert_eq!(col.children()[0].frame().x, 15.0);
        assert_eq!(col.children()[1].frame().x, 0.0);
        assert_eq!(col.children()[1].frame().y, 5.0);
    }

    #[test]
    fn test_row_end_justification() {
        let mut row = AxisBox::row()
            .with_justification(Justification::End)
            .with_child(LayoutNode::item(SizeConfig::fixed(5.0), SizeConfig::fixed(4.0)))
            .with_child(LayoutNode::item(SizeConfig::fixed(5.0), SizeConfig::fixed(10.0)));
        row.do_local_sizing();
        row.set_width(10.0);
        row.complete_local_layout();
        assert_eq!(row.height(), 10.0);
        assert_eq!(row.children()[0].frame().y, 6.0);
        assert_eq!(row.children()[1].frame().y, 0.0);
    }

    #[test]
    fn test_cross_axis_uses_natural_size() {
        let mut row = AxisBox::row().with_child(LayoutNode::item(
            SizeConfig::fixed(5.0),
            SizeConfig::new(4.0, 1.0, 30.0).unwrap(),
        ));
        row.do_local_sizing();
        row.set_height(25.0);
        row.set_width(5.0);
        row.complete_local_layout();
        assert_eq!(row.children()[0].frame().height, 4.0);
        assert_eq!(row.height(), 4.0);
    }

    #[test]
    fn test_empty_container_keeps_cross_size() {
        let mut row = AxisBox::row().with_frame(BoundingBox::new(0.0, 0.0, 30.0, 12.0));
        row.do_local_sizing();
        row.complete_local_layout();
        assert_eq!(row.height(), 12.0);
        assert_eq!(row.width(), 30.0);
    }

    #[test]
    fn test_placement_is_idempotent() {
        let mut row = AxisBox::row()
            .with_justification(Justification::Center)
            .with_child(item(8.0, 2.0))
            .with_child(LayoutNode::spring())
            .with_child(item(7.0, 3.0));
        row.set_width(11.0);
        row.do_local_sizing();
        row.complete_local_layout();
        let first: Vec<BoundingBox> = row.children().iter().map(|c| *c.frame()).collect();
        row.do_local_sizing();
        row.complete_local_layout();
        let second: Vec<BoundingBox> = row.children().iter().map(|c| *c.frame()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_primary_size_setter_pins_and_damages() {
        let log = Rc::new(DamageLog::new());
        let mut row = AxisBox::row();
        row.set_listener(log.clone());

        row.set_width(40.0);
        assert!(row.is_pinned());
        assert_eq!(row.w_config(), SizeConfig::fixed(40.0));
        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].region.width, 0.0);
        assert_eq!(events[1].region.width, 40.0);
        assert!(events.iter().all(|d| d.cause == DamageCause::Resized));

        row.set_width(40.0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_unchanged_primary_size_is_a_no_op() {
        let log = Rc::new(DamageLog::new());
        let mut row = AxisBox::row().with_frame(BoundingBox::new(0.0, 0.0, 30.0, 5.0));
        row.set_listener(log.clone());

        row.set_width(30.0);
        assert!(log.is_empty());
        assert!(!row.is_pinned());
        assert_eq!(row.w_config(), SizeConfig::ZERO);
    }

    #[test]
    fn test_pin_size_at_current_width() {
        let log = Rc::new(DamageLog::new());
        let mut row = AxisBox::row();
        row.set_listener(log.clone());

        row.pin_size(0.0);
        assert!(row.is_pinned());
        assert_eq!(row.w_config(), SizeConfig::fixed(0.0));
        assert!(log.is_empty());

        row.pin_size(12.0);
        assert_eq!(row.width(), 12.0);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_cross_size_setter_is_silent() {
        let log = Rc::new(DamageLog::new());
        let mut row = AxisBox::row();
        row.set_listener(log.clone());
        row.set_height(12.0);
        assert_eq!(row.height(), 12.0);
        assert!(!row.is_pinned());
        assert_eq!(row.h_config(), SizeConfig::ZERO);
        assert!(log.is_empty());
    }

    #[test]
    fn test_justification_setter_damages_only_on_change() {
        let log = Rc::new(DamageLog::new());
        let mut col = AxisBox::column().with_frame(BoundingBox::new(0.0, 0.0, 5.0, 5.0));
        col.set_listener(log.clone());

        col.set_justification(Justification::Start);
        assert!(log.is_empty());

        col.set_justification(Justification::End);
        let events = log.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cause, DamageCause::Justified);
        assert_eq!(events[0].region, BoundingBox::new(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn test_position_setter() {
        let log = Rc::new(DamageLog::new());
        let mut row = AxisBox::row().with_frame(BoundingBox::new(0.0, 0.0, 5.0, 5.0));
        row.set_listener(log.clone());
        row.set_position(0.0, 0.0);
        assert!(log.is_empty());
        row.set_position(3.0, 4.0);
        assert_eq!(log.bounds(), Some(BoundingBox::new(0.0, 0.0, 8.0, 9.0)));
    }
}
