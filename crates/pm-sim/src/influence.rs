//! Coffee influence routing.
//!
//! A host whose agent is drinking coffee can influence nearby hosts whose
//! agents are open to it.  Delivery sets the receiver's `saw_coffee` flag,
//! which its movement model consumes on its next tick.
//!
//! Neighbours are found through a uniform grid rebuilt every tick with a
//! cell size equal to the influence radius, so a 3 × 3 block of cells
//! around the sender covers every candidate.

use pm_core::Point;

use crate::{SimError, SimResult};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<(i32, i32), V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<(i32, i32), V>;

/// Default radius within which a coffee drinker is noticed.
pub const DEFAULT_INFLUENCE_RADIUS: f64 = 10.0;

/// Default chance, per tick and per eligible pair, that a drinker is noticed.
pub const DEFAULT_INFLUENCE_PROBABILITY: f64 = 0.05;

/// When and how likely a coffee drinker influences a neighbour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InfluenceRule {
    pub radius:      f64,
    pub probability: f64,
}

impl Default for InfluenceRule {
    fn default() -> Self {
        Self {
            radius:      DEFAULT_INFLUENCE_RADIUS,
            probability: DEFAULT_INFLUENCE_PROBABILITY,
        }
    }
}

impl InfluenceRule {
    pub fn new(radius: f64, probability: f64) -> SimResult<Self> {
        let rule = Self { radius, probability };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SimError::Config(format!(
                "influence radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(SimError::Config(format!(
                "influence probability must be in [0, 1], got {}",
                self.probability
            )));
        }
        Ok(())
    }
}

// ── Neighbour grid ────────────────────────────────────────────────────────────

/// Agent indices bucketed by grid cell.  Built once per tick.
pub(crate) struct NeighborGrid {
    cell:  f64,
    cells: CellMap<Vec<usize>>,
}

impl NeighborGrid {
    /// Bucket `points` (agent index, position) into square cells of side
    /// `cell`.  Within a cell, indices keep their input order.
    pub(crate) fn build(cell: f64, points: impl IntoIterator<Item = (usize, Point)>) -> Self {
        let mut cells: CellMap<Vec<usize>> = CellMap::default();
        for (i, p) in points {
            cells.entry(cell_of(cell, p)).or_default().push(i);
        }
        Self { cell, cells }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every index bucketed in the 3 × 3 block of cells around `p`.
    ///
    /// A superset of the agents within `cell` of `p`; callers filter by
    /// exact distance.
    pub(crate) fn near(&self, p: Point) -> Vec<usize> {
        let (cx, cy) = cell_of(self.cell, p);
        let mut out = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out.sort_unstable();
        out
    }
}

#[inline]
fn cell_of(cell: f64, p: Point) -> (i32, i32) {
    ((p.x / cell).floor() as i32, (p.y / cell).floor() as i32)
}
