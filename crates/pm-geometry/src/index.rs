//! R-tree over restricted polygon edges.
//!
//! Every edge of every restricted polygon is stored with its axis-aligned
//! bounding box.  A crossing query first collects the edges whose box
//! overlaps the query segment's box, then runs the exact
//! [`segments_intersect`] test on those candidates only.  Answers are the
//! same as the linear [`crosses_restricted`] scan.
//!
//! [`crosses_restricted`]: crate::crosses_restricted

use rstar::{AABB, Envelope, RTree, RTreeObject, SelectionFunction};

use pm_core::Point;

use crate::polygon::{Polygon, segments_intersect};

// ── R-tree edge entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct EdgeEntry {
    a: Point,
    b: Point,
}

impl RTreeObject for EdgeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a.to_array(), self.b.to_array())
    }
}

/// Selects every entry whose envelope overlaps `query`.
struct Overlapping {
    query: AABB<[f64; 2]>,
}

impl SelectionFunction<EdgeEntry> for Overlapping {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        envelope.intersects(&self.query)
    }

    fn should_unpack_leaf(&self, leaf: &EdgeEntry) -> bool {
        leaf.envelope().intersects(&self.query)
    }
}

// ── RestrictedIndex ───────────────────────────────────────────────────────────

/// Bulk-loaded spatial index of restricted edges.
pub struct RestrictedIndex {
    tree: RTree<EdgeEntry>,
}

impl RestrictedIndex {
    /// Index every edge (closing edge included) of `polygons`.
    pub fn build(polygons: &[Polygon]) -> Self {
        // Bulk load is O(N log N) and gives a better-balanced tree than inserts.
        let entries: Vec<EdgeEntry> = polygons
            .iter()
            .flat_map(Polygon::edges)
            .map(|(a, b)| EdgeEntry { a, b })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Number of indexed edges.
    pub fn edge_count(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// `true` iff `from → to` intersects any indexed edge.
    pub fn crosses(&self, from: Point, to: Point) -> bool {
        let query = AABB::from_corners(from.to_array(), to.to_array());
        self.tree
            .locate_with_selection_function(Overlapping { query })
            .any(|e| segments_intersect(from, to, e.a, e.b))
    }
}

impl std::fmt::Debug for RestrictedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestrictedIndex")
            .field("edges", &self.tree.size())
            .finish()
    }
}
