//! Sub-cell interpolation of the exact crossing point on a cell edge.
//!
//! Given the cell the tracer just stepped into and the direction it arrived
//! from, this resolves which cell edge was crossed and where along that edge
//! the sampled surface crosses the cutoff. Output is a grid-space coordinate;
//! projection happens in the tracer.

use crate::diagnostics::Diagnostic;

/// Fraction along an edge from sample `a` (0.0) to sample `b` (1.0) where the
/// surface crosses the cutoff. Non-finite results (zero or near-zero
/// denominator) degrade to the midpoint with a diagnostic.
fn crossing_fraction<F: FnMut(Diagnostic)>(
    a: f64,
    b: f64,
    cutoff: f64,
    cell: (usize, usize),
    diag: &mut F,
) -> f64 {
    let t = (cutoff - a) / (b - a);
    if t.is_finite() {
        t
    } else {
        diag(Diagnostic::DegenerateInterpolation {
            x: cell.0,
            y: cell.1,
        });
        0.5
    }
}

/// Grid-space coordinate where the contour crosses the edge between
/// `old_cell` and `new_cell`.
///
/// The edge is derived from the direction of travel into `new_cell`; the
/// fraction is computed from `new_cell`'s corner samples. Corner samples on a
/// grid-boundary side of the cell are replaced by the cutoff itself, so
/// boundary crossings never extrapolate past the sampled area. With
/// `interpolate` disabled every crossing sits at the edge midpoint.
///
/// Returns `None` if the travel between the two cells is not a single
/// axis-aligned step (zero or diagonal): no edge can be attributed, and the
/// tracer aborts the ring.
pub(crate) fn crossing_point<F: FnMut(Diagnostic)>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoff: f64,
    old_cell: (usize, usize),
    new_cell: (usize, usize),
    interpolate: bool,
    diag: &mut F,
) -> Option<(f64, f64)> {
    let (x, y) = new_cell;
    let dx = x as isize - old_cell.0 as isize;
    let dy = y as isize - old_cell.1 as isize;

    let cell_width = width - 1;
    let cell_height = height - 1;

    // Boundary override: same rule as the classifier's edge closing.
    let left = x == 0;
    let right = x == cell_width - 1;
    let top = y == 0;
    let bottom = y == cell_height - 1;

    let tl = if left || top { cutoff } else { values[y * width + x] };
    let tr = if right || top { cutoff } else { values[y * width + x + 1] };
    let bl = if left || bottom { cutoff } else { values[(y + 1) * width + x] };
    let br = if right || bottom { cutoff } else { values[(y + 1) * width + x + 1] };

    let mut fraction = |a: f64, b: f64, diag: &mut F| -> f64 {
        if interpolate {
            crossing_fraction(a, b, cutoff, new_cell, diag)
        } else {
            0.5
        }
    };

    match (dx, dy) {
        // Left-to-right: vertical edge at x, top-left to bottom-left
        (1, 0) => {
            let t = fraction(tl, bl, diag);
            Some((x as f64, y as f64 + t))
        }
        // Right-to-left: vertical edge at x+1, top-right to bottom-right
        (-1, 0) => {
            let t = fraction(tr, br, diag);
            Some((x as f64 + 1.0, y as f64 + t))
        }
        // Top-to-bottom: horizontal edge at y, top-left to top-right
        (0, 1) => {
            let t = fraction(tl, tr, diag);
            Some((x as f64 + t, y as f64))
        }
        // Bottom-to-top: horizontal edge at y+1, bottom-left to bottom-right
        (0, -1) => {
            let t = fraction(bl, br, diag);
            Some((x as f64 + t, y as f64 + 1.0))
        }
        _ => None,
    }
}
