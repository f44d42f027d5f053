//! Invalidation signalling
//!
//! Containers never re-run layout themselves. When a setter changes
//! something that affects geometry, the container reports the affected
//! region to whatever listener the driver attached, and the driver decides
//! when to lay the tree out again.

use std::cell::RefCell;

use super::types::BoundingBox;

/// What kind of change produced a damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Moved,
    Resized,
    Justified,
}

/// A region whose contents are stale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damage {
    pub region: BoundingBox,
    pub cause: DamageCause,
}

impl Damage {
    pub fn new(region: BoundingBox, cause: DamageCause) -> Self {
        Self { region, cause }
    }
}

/// Receiver of damage events
pub trait DamageListener {
    fn damaged(&self, damage: Damage);
}

/// Listener that records every event until drained
#[derive(Debug, Default)]
pub struct DamageLog {
    events: RefCell<Vec<Damage>>,
}

impl DamageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Remove and return all recorded events
    pub fn drain(&self) -> Vec<Damage> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Smallest box covering every recorded region
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.events
            .borrow()
            .iter()
            .map(|d| d.region)
            .reduce(|acc, r| acc.union(&r))
    }
}

impl DamageListener for DamageLog {
    fn damaged(&self, damage: Damage) {
        self.events.borrow_mut().push(damage);
    }
}
