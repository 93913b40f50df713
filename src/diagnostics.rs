//! Diagnostics emitted while a contour run degrades gracefully.
//!
//! None of these are hard failures: every anomaly costs at most one ring or
//! one hole and the run always returns a (possibly incomplete) geometry. The
//! default entry points forward diagnostics to [`log::warn!`]; the
//! `_with_diagnostics` variants collect them so tests can assert on them.

use thiserror::Error;

/// A recoverable anomaly observed during contour extraction.
///
/// Cell coordinates are in case-grid space (column, row), vertex coordinates
/// are in the caller's projected space.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A trace stepped into a cell already consumed by a completed ring, ran
    /// into a trivial case mid-trace, or could not derive an entry edge.
    /// The partial ring was discarded.
    #[error("broken ring at cell ({x}, {y}); partial ring discarded")]
    BrokenRing { x: usize, y: usize },

    /// A ring exceeded the configured coordinate cap and was discarded.
    #[error("ring at cell ({x}, {y}) exceeded {cap} coordinates; discarded")]
    OversizedRing { x: usize, y: usize, cap: usize },

    /// A saddle cell was entered from neither of its two expected directions.
    /// The tracer held position; the ring is aborted on the next step.
    #[error("saddle cell ({x}, {y}) entered from an unexpected direction")]
    SaddleMisdirection { x: usize, y: usize },

    /// The crossing fraction was non-finite; the edge midpoint was used
    /// instead.
    #[error("degenerate interpolation entering cell ({x}, {y}); using edge midpoint")]
    DegenerateInterpolation { x: usize, y: usize },

    /// A hole ring was contained by no shell and was dropped from the output.
    #[error("hole with representative point ({x}, {y}) matched no shell; dropped")]
    UnmatchedHole { x: f64, y: f64 },
}
