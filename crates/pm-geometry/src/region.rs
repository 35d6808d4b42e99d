//! The café region set and its builder.
//!
//! A [`RegionSet`] is built once by the host from already-translated
//! geometry and then shared read-only by every agent.  All validation happens
//! in [`RegionSetBuilder::build`]; after that every accessor is infallible.

use pm_core::{Point, TableId};

use crate::error::{GeometryError, GeometryResult};
use crate::index::RestrictedIndex;
use crate::polygon::Polygon;

/// Areas below this are treated as zero (collinear or repeated vertices).
const MIN_AREA: f64 = 1e-9;

// ── RegionSet ─────────────────────────────────────────────────────────────────

/// Immutable café geometry.
///
/// Do not construct directly; use [`RegionSetBuilder`].
#[derive(Debug)]
pub struct RegionSet {
    width:  f64,
    height: f64,

    allowed:    Polygon,
    start:      Polygon,
    restricted: Vec<Polygon>,

    classroom:          Vec<Point>,
    classroom_entrance: Point,

    /// Table centers, indexed by `TableId`.
    tables: Vec<Point>,

    /// Queue slot positions sorted ascending by `y`.  Index 0 is the service
    /// point; the last index is the tail.
    queue:      Vec<Point>,
    queue_tail: Point,

    index: RestrictedIndex,
}

impl RegionSet {
    pub fn builder() -> RegionSetBuilder {
        RegionSetBuilder::new()
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    // ── Zones ─────────────────────────────────────────────────────────────

    pub fn allowed_zone(&self) -> &Polygon {
        &self.allowed
    }

    pub fn start_region(&self) -> &Polygon {
        &self.start
    }

    pub fn restricted(&self) -> &[Polygon] {
        &self.restricted
    }

    #[inline]
    pub fn in_allowed_zone(&self, p: Point) -> bool {
        self.allowed.contains(p)
    }

    #[inline]
    pub fn in_start_region(&self, p: Point) -> bool {
        self.start.contains(p)
    }

    /// `true` iff `from → to` touches any restricted edge.
    #[inline]
    pub fn crosses_restricted(&self, from: Point, to: Point) -> bool {
        self.index.crosses(from, to)
    }

    // ── Classroom ─────────────────────────────────────────────────────────

    pub fn classroom(&self) -> &[Point] {
        &self.classroom
    }

    /// Midpoint of the first two classroom boundary points.
    #[inline]
    pub fn classroom_entrance(&self) -> Point {
        self.classroom_entrance
    }

    // ── Tables ────────────────────────────────────────────────────────────

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Center of table `id`, or `None` for an unknown id.
    #[inline]
    pub fn table(&self, id: TableId) -> Option<Point> {
        self.tables.get(id.index()).copied()
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    pub fn slot_count(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_slots(&self) -> &[Point] {
        &self.queue
    }

    #[inline]
    pub fn queue_slot(&self, index: usize) -> Option<Point> {
        self.queue.get(index).copied()
    }

    /// Entry point of the queue (the slot farthest from service).
    #[inline]
    pub fn queue_tail(&self) -> Point {
        self.queue_tail
    }
}

// ── RegionSetBuilder ──────────────────────────────────────────────────────────

/// Collects café geometry and validates it into a [`RegionSet`].
///
/// ```ignore
/// let mut b = RegionSetBuilder::new();
/// b.bounds(200.0, 100.0)
///     .allowed_zone(Polygon::rect(Point::new(10.0, 10.0), Point::new(190.0, 90.0)))
///     .start_region(Polygon::rect(Point::new(10.0, 10.0), Point::new(30.0, 30.0)));
/// let table = b.add_table(Polygon::rect(Point::new(100.0, 40.0), Point::new(110.0, 50.0)));
/// let regions = b.classroom(points).queue_slots(slots).build()?;
/// ```
#[derive(Default)]
pub struct RegionSetBuilder {
    bounds:           Option<(f64, f64)>,
    allowed:          Option<Polygon>,
    start:            Option<Polygon>,
    restricted:       Vec<Polygon>,
    tables:           Vec<Polygon>,
    classroom:        Vec<Point>,
    classroom_blocks: bool,
    queue:            Vec<Point>,
}

impl RegionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation area `[0, width) × [0, height)`.
    pub fn bounds(&mut self, width: f64, height: f64) -> &mut Self {
        self.bounds = Some((width, height));
        self
    }

    pub fn allowed_zone(&mut self, polygon: Polygon) -> &mut Self {
        self.allowed = Some(polygon);
        self
    }

    pub fn start_region(&mut self, polygon: Polygon) -> &mut Self {
        self.start = Some(polygon);
        self
    }

    /// Add an obstacle (walls, counters, the queue rope).
    pub fn add_restricted(&mut self, polygon: Polygon) -> &mut Self {
        self.restricted.push(polygon);
        self
    }

    /// Add a table.  Its outline becomes restricted and its vertex average
    /// becomes the table center addressed by the returned id.
    pub fn add_table(&mut self, polygon: Polygon) -> TableId {
        // Overflow past u16 is rejected in `build`.
        let id = TableId(self.tables.len() as u16);
        self.tables.push(polygon);
        id
    }

    /// Classroom outline.  The first two points define the entrance.
    pub fn classroom(&mut self, points: Vec<Point>) -> &mut Self {
        self.classroom = points;
        self
    }

    /// Also treat the classroom outline as a restricted polygon.
    pub fn classroom_blocks(&mut self, blocks: bool) -> &mut Self {
        self.classroom_blocks = blocks;
        self
    }

    /// Queue slot positions in any order; they are sorted by `y` at build.
    pub fn queue_slots(&mut self, points: Vec<Point>) -> &mut Self {
        self.queue = points;
        self
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Validate and freeze the geometry.
    ///
    /// Time complexity: O(E log E) for the R-tree bulk load, E = restricted
    /// edges.
    pub fn build(&mut self) -> GeometryResult<RegionSet> {
        let (width, height) = self
            .bounds
            .ok_or_else(|| GeometryError::Config("simulation bounds not set".into()))?;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::Config(format!(
                "bounds must be positive and finite, got {width} × {height}"
            )));
        }

        let allowed = self
            .allowed
            .take()
            .ok_or_else(|| GeometryError::Config("allowed zone not set".into()))?;
        check_polygon("allowed zone", &allowed)?;

        let start = self
            .start
            .take()
            .ok_or_else(|| GeometryError::Config("start region not set".into()))?;
        check_polygon("start region", &start)?;

        for (i, poly) in self.restricted.iter().enumerate() {
            check_polygon(&format!("restricted polygon {i}"), poly)?;
        }

        if self.tables.is_empty() {
            return Err(GeometryError::Config("at least one table is required".into()));
        }
        if self.tables.len() >= u16::MAX as usize {
            return Err(GeometryError::Config(format!(
                "{} tables exceed the table id range",
                self.tables.len()
            )));
        }
        let mut tables = Vec::with_capacity(self.tables.len());
        for (i, poly) in self.tables.iter().enumerate() {
            check_polygon(&format!("table {i}"), poly)?;
            // `check_polygon` guarantees at least three vertices.
            if let Some(center) = poly.centroid() {
                tables.push(center);
            }
        }

        let classroom = std::mem::take(&mut self.classroom);
        if classroom.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                region:  "classroom".into(),
                count:   classroom.len(),
                minimum: 2,
            });
        }
        if !classroom.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::NonFinite { region: "classroom".into() });
        }
        let classroom_entrance = classroom[0].midpoint(classroom[1]);

        let mut queue = std::mem::take(&mut self.queue);
        if queue.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                region:  "queue slots".into(),
                count:   queue.len(),
                minimum: 2,
            });
        }
        if !queue.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::NonFinite { region: "queue slots".into() });
        }
        queue.sort_by(|a, b| a.y.total_cmp(&b.y));
        let queue_tail = queue[queue.len() - 1];

        let mut restricted = std::mem::take(&mut self.restricted);
        restricted.extend(self.tables.drain(..));
        if self.classroom_blocks {
            let outline = Polygon::new(classroom.clone());
            check_polygon("classroom outline", &outline)?;
            restricted.push(outline);
        }

        if let Some(i) = restricted
            .iter()
            .position(|r| allowed.vertices().iter().all(|&v| r.contains(v)))
        {
            return Err(GeometryError::Config(format!(
                "allowed zone lies entirely inside restricted polygon {i}"
            )));
        }
        if let Some((lo, hi)) = allowed.bounding_box() {
            if hi.x <= 0.0 || hi.y <= 0.0 || lo.x >= width || lo.y >= height {
                return Err(GeometryError::Config(
                    "allowed zone lies outside the simulation bounds".into(),
                ));
            }
        }

        let index = RestrictedIndex::build(&restricted);

        Ok(RegionSet {
            width,
            height,
            allowed,
            start,
            restricted,
            classroom,
            classroom_entrance,
            tables,
            queue,
            queue_tail,
            index,
        })
    }
}

fn check_polygon(region: &str, poly: &Polygon) -> GeometryResult<()> {
    if poly.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            region:  region.to_owned(),
            count:   poly.len(),
            minimum: 3,
        });
    }
    if !poly.vertices().iter().all(|p| p.is_finite()) {
        return Err(GeometryError::NonFinite { region: region.to_owned() });
    }
    if poly.area() < MIN_AREA {
        return Err(GeometryError::ZeroArea { region: region.to_owned() });
    }
    Ok(())
}
