//! The demo café floor plan.
//!
//! A 400 × 300 room: entrance in the lower-left corner, four tables in the
//! middle, the counter line on the right, a pillar, and the classroom door
//! at the top-left.

use pm_core::Point;
use pm_geometry::{GeometryResult, Polygon, RegionSet, RegionSetBuilder};

/// From the door on the bottom edge up into the room.
pub const CLASSROOM_STEP_IN: (f64, f64) = (0.0, 25.0);
/// Back out through the door and clear of it.
pub const CLASSROOM_EXIT: (f64, f64) = (0.0, -45.0);

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

pub fn build_cafe() -> GeometryResult<RegionSet> {
    let mut b = RegionSetBuilder::new();
    b.bounds(400.0, 300.0)
        .allowed_zone(Polygon::rect(p(5.0, 5.0), p(395.0, 295.0)))
        .start_region(Polygon::rect(p(20.0, 20.0), p(60.0, 60.0)))
        // Pillar and the counter behind the line.
        .add_restricted(Polygon::rect(p(250.0, 40.0), p(270.0, 60.0)))
        .add_restricted(Polygon::rect(p(360.0, 90.0), p(380.0, 170.0)))
        .classroom(vec![p(40.0, 240.0), p(100.0, 240.0), p(100.0, 290.0), p(40.0, 290.0)])
        // Service point first; the tail is the last slot.
        .queue_slots(vec![
            p(300.0, 100.0),
            p(300.0, 115.0),
            p(300.0, 130.0),
            p(300.0, 145.0),
            p(300.0, 160.0),
        ]);

    for (x, y) in [(150.0, 180.0), (200.0, 180.0), (150.0, 230.0), (200.0, 230.0)] {
        b.add_table(Polygon::rect(p(x, y), p(x + 20.0, y + 15.0)));
    }
    b.build()
}
