//! Ring tracer: walks the case grid cell to cell and produces closed rings.
//!
//! The tracer scans cells in row-major order and starts a trace at every
//! unvisited cell whose case defines an exit direction. Each trace is an
//! early-return attempt with three outcomes: the ring closes, it breaks
//! (stepped into consumed topology, ran onto a trivial case, left the grid,
//! or lost its entry edge), or it exceeds the coordinate cap. Aborted traces
//! discard the partial ring and emit a diagnostic; the scan then continues.

use geojson::Position;

use crate::case::{CellCase, Move};
use crate::classifier::CaseGrid;
use crate::diagnostics::Diagnostic;
use crate::interpolate::crossing_point;

/// Read-only inputs shared by every trace of one invocation.
pub(crate) struct TraceContext<'a> {
    pub values: &'a [f64],
    pub width: usize,
    pub height: usize,
    pub cutoff: f64,
    pub interpolate: bool,
    pub max_ring_coordinates: usize,
}

/// A closed ring in projected coordinates with its accumulated winding sum.
///
/// First and last coordinate are identical. The winding sign convention is
/// inverted relative to standard orientation because rows increase downward:
/// positive means shell, negative (or zero) means hole.
#[derive(Debug, Clone)]
pub(crate) struct TracedRing {
    pub coords: Vec<Position>,
    pub direction: f64,
}

enum TraceOutcome {
    Closed(TracedRing),
    Broken,
    Oversized,
}

/// Trace every ring in the case grid.
pub(crate) fn trace_rings<P, F>(
    cases: &CaseGrid,
    ctx: &TraceContext<'_>,
    project: &P,
    diag: &mut F,
) -> Vec<TracedRing>
where
    P: Fn(f64, f64) -> (f64, f64),
    F: FnMut(Diagnostic),
{
    let mut visited = vec![false; cases.cell_count()];
    let mut rings = Vec::new();

    for y in 0..cases.height {
        for x in 0..cases.width {
            if visited[y * cases.width + x] {
                continue;
            }
            // Saddles are only followed mid-trace, never used as a start.
            if cases.get(x, y).exit_move().is_none() {
                continue;
            }
            if let TraceOutcome::Closed(ring) =
                trace_ring(cases, &mut visited, (x, y), ctx, project, diag)
            {
                rings.push(ring);
            }
        }
    }

    rings
}

/// Trace one ring starting at `start`, which must hold a non-trivial,
/// non-saddle case.
fn trace_ring<P, F>(
    cases: &CaseGrid,
    visited: &mut [bool],
    start: (usize, usize),
    ctx: &TraceContext<'_>,
    project: &P,
    diag: &mut F,
) -> TraceOutcome
where
    P: Fn(f64, f64) -> (f64, f64),
    F: FnMut(Diagnostic),
{
    let (start_x, start_y) = start;
    let mut x = start_x;
    let mut y = start_y;
    let mut prev: Option<(usize, usize)> = None;
    let mut coords: Vec<Position> = Vec::new();
    let mut direction = 0.0;

    loop {
        // A cell consumed by this or an earlier ring means the trace crossed
        // into topology that is already spoken for.
        if visited[y * cases.width + x] {
            diag(Diagnostic::BrokenRing { x, y });
            return TraceOutcome::Broken;
        }

        let case = cases.get(x, y);

        // Saddles are legitimately revisited from the other passage.
        if !case.is_saddle() {
            visited[y * cases.width + x] = true;
        }

        // Should be unreachable behind the visited guard, but a hand-built
        // case grid can point a trace onto an empty cell.
        if case.is_trivial() {
            diag(Diagnostic::BrokenRing { x, y });
            return TraceOutcome::Broken;
        }

        let exit = match case {
            // Saddle with top-right/bottom-left below: resolved by vertical
            // entry. The fixed diagonal orientation is a deliberate
            // approximation; the opposite orientation would split the rings
            // differently but stay topologically valid.
            CellCase::SaddleRising => match prev {
                Some((px, py)) if px == x && py > y => Some(Move::Right),
                Some((px, py)) if px == x && py < y => Some(Move::Left),
                _ => {
                    diag(Diagnostic::SaddleMisdirection { x, y });
                    None
                }
            },
            // Saddle with top-left/bottom-right below: resolved by horizontal
            // entry.
            CellCase::SaddleFalling => match prev {
                Some((px, py)) if py == y && px < x => Some(Move::Down),
                Some((px, py)) if py == y && px > x => Some(Move::Up),
                _ => {
                    diag(Diagnostic::SaddleMisdirection { x, y });
                    None
                }
            },
            other => other.exit_move(),
        };

        // On saddle misdirection the tracer holds position; the held step
        // then fails edge attribution below and aborts the ring.
        let (next_x, next_y) = match exit {
            Some(Move::Right) => {
                if x + 1 >= cases.width {
                    diag(Diagnostic::BrokenRing { x, y });
                    return TraceOutcome::Broken;
                }
                (x + 1, y)
            }
            Some(Move::Down) => {
                if y + 1 >= cases.height {
                    diag(Diagnostic::BrokenRing { x, y });
                    return TraceOutcome::Broken;
                }
                (x, y + 1)
            }
            Some(Move::Left) => {
                if x == 0 {
                    diag(Diagnostic::BrokenRing { x, y });
                    return TraceOutcome::Broken;
                }
                (x - 1, y)
            }
            Some(Move::Up) => {
                if y == 0 {
                    diag(Diagnostic::BrokenRing { x, y });
                    return TraceOutcome::Broken;
                }
                (x, y - 1)
            }
            None => (x, y),
        };

        // Discrete shoelace term; sign inverted because rows grow downward.
        direction += (next_x as f64 - x as f64) * (next_y as f64 + y as f64);

        match crossing_point(
            ctx.values,
            ctx.width,
            ctx.height,
            ctx.cutoff,
            (x, y),
            (next_x, next_y),
            ctx.interpolate,
            diag,
        ) {
            Some((grid_x, grid_y)) => {
                let (px, py) = project(grid_x, grid_y);
                coords.push(vec![px, py]);
            }
            None => {
                diag(Diagnostic::BrokenRing {
                    x: next_x,
                    y: next_y,
                });
                return TraceOutcome::Broken;
            }
        }

        if coords.len() > ctx.max_ring_coordinates {
            diag(Diagnostic::OversizedRing {
                x: start_x,
                y: start_y,
                cap: ctx.max_ring_coordinates,
            });
            return TraceOutcome::Oversized;
        }

        if next_x == start_x && next_y == start_y {
            let first = coords[0].clone();
            coords.push(first);
            return TraceOutcome::Closed(TracedRing { coords, direction });
        }

        prev = Some((x, y));
        x = next_x;
        y = next_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn midpoint_ctx(values: &[f64], width: usize, height: usize) -> TraceContext<'_> {
        TraceContext {
            values,
            width,
            height,
            cutoff: 0.5,
            interpolate: false,
            max_ring_coordinates: 100,
        }
    }

    /// Case grid of the all-below boundary ring on a 4x4 grid.
    fn boundary_ring_cases() -> CaseGrid {
        CaseGrid::from_bits(&[2, 3, 1, 6, 15, 9, 4, 12, 8], 3, 3)
    }

    #[test]
    fn test_boundary_ring_closes_as_shell() {
        let values = vec![0.0; 16];
        let cases = boundary_ring_cases();
        let ctx = midpoint_ctx(&values, 4, 4);
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &identity, &mut |d| diags.push(d));

        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        // 8 cells on the ring, one crossing each, plus the closing duplicate.
        assert_eq!(ring.coords.len(), 9);
        assert_eq!(ring.coords.first(), ring.coords.last());
        assert!(ring.direction > 0.0, "direction {}", ring.direction);
        // First move is (0,0) -> (0,1): midpoint of the edge at y=1.
        assert_eq!(ring.coords[0], vec![0.5, 1.0]);
    }

    #[test]
    fn test_trace_onto_trivial_cell_breaks() {
        // Case 4 exits right onto an empty cell.
        let values = vec![0.0; 9];
        let cases = CaseGrid::from_bits(&[4, 0, 0, 0], 2, 2);
        let ctx = midpoint_ctx(&values, 3, 3);
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &identity, &mut |d| diags.push(d));

        assert!(rings.is_empty());
        assert!(diags.contains(&Diagnostic::BrokenRing { x: 1, y: 0 }));
    }

    #[test]
    fn test_exit_off_grid_breaks() {
        // Single cell whose case exits right, with nowhere to go.
        let values = vec![0.0; 4];
        let cases = CaseGrid::from_bits(&[4], 1, 1);
        let ctx = midpoint_ctx(&values, 2, 2);
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &identity, &mut |d| diags.push(d));

        assert!(rings.is_empty());
        assert_eq!(diags, vec![Diagnostic::BrokenRing { x: 0, y: 0 }]);
    }

    #[test]
    fn test_saddle_entered_from_wrong_direction() {
        // Case 2 exits down into a falling saddle, which only accepts
        // horizontal entry: the tracer logs, holds position, and the held
        // step aborts the ring.
        let values = vec![0.0; 6];
        let cases = CaseGrid::from_bits(&[2, 10], 1, 2);
        let ctx = midpoint_ctx(&values, 2, 3);
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &identity, &mut |d| diags.push(d));

        assert!(rings.is_empty());
        assert_eq!(
            diags,
            vec![
                Diagnostic::SaddleMisdirection { x: 0, y: 1 },
                Diagnostic::BrokenRing { x: 0, y: 1 },
            ]
        );
    }

    #[test]
    fn test_coordinate_cap_discards_ring() {
        let values = vec![0.0; 16];
        let cases = boundary_ring_cases();
        let mut ctx = midpoint_ctx(&values, 4, 4);
        ctx.max_ring_coordinates = 4;
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &identity, &mut |d| diags.push(d));

        // The 9-coordinate ring is dropped entirely, not truncated; the
        // leftover unvisited cells each break against consumed topology.
        assert!(rings.is_empty());
        assert!(diags
            .iter()
            .any(|d| matches!(d, Diagnostic::OversizedRing { x: 0, y: 0, cap: 4 })));
    }

    #[test]
    fn test_projection_applied_per_vertex() {
        let values = vec![0.0; 16];
        let cases = boundary_ring_cases();
        let ctx = midpoint_ctx(&values, 4, 4);
        let shift = |x: f64, y: f64| (x * 2.0 + 10.0, y - 1.0);
        let mut diags = Vec::new();
        let rings = trace_rings(&cases, &ctx, &shift, &mut |d| diags.push(d));

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].coords[0], vec![11.0, 0.0]);
    }
}
