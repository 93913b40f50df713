//! Nester: winding classification and hole-to-shell assignment.
//!
//! Rings arrive tagged with their accumulated winding sum. Positive sums are
//! shells, negative are holes; a degenerate zero sum counts as a hole. Each
//! hole is assigned to the first shell (in shell scan order) that contains
//! its first coordinate. Shells are assumed not to overlap and each hole to
//! lie in exactly one shell; the nester does not verify this and will
//! misassign on pathological input.

use geojson::Position;

use crate::diagnostics::Diagnostic;
use crate::tracer::TracedRing;

/// Ray-casting point-in-polygon test against a single ring.
///
/// Reference: http://www.ecse.rpi.edu/Homepages/wrf/Research/Short_Notes/pnpoly.html
fn point_in_ring(x: f64, y: f64, ring: &[Position]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let one = &ring[i];
        let two = &ring[j];

        if ((one[1] > y) != (two[1] > y))
            && (x < (two[0] - one[0]) * (y - one[1]) / (two[1] - one[1]) + one[0])
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Assign every hole ring to its containing shell.
///
/// Returns MultiPolygon rings: one entry per shell, exterior ring first,
/// followed by the holes nested inside it. Holes contained by no shell are
/// dropped with a diagnostic.
pub(crate) fn nest_rings<F>(rings: Vec<TracedRing>, diag: &mut F) -> Vec<Vec<Vec<Position>>>
where
    F: FnMut(Diagnostic),
{
    let mut polygons: Vec<Vec<Vec<Position>>> = Vec::new();
    let mut holes: Vec<Vec<Position>> = Vec::new();

    for ring in rings {
        if ring.direction > 0.0 {
            polygons.push(vec![ring.coords]);
        } else {
            holes.push(ring.coords);
        }
    }

    for hole in holes {
        let x = hole[0][0];
        let y = hole[0][1];

        // First match wins, in shell scan order.
        match polygons.iter_mut().find(|poly| point_in_ring(x, y, &poly[0])) {
            Some(polygon) => polygon.push(hole),
            None => diag(Diagnostic::UnmatchedHole { x, y }),
        }
    }

    polygons
}
