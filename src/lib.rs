//! # grid-isolines
//!
//! Closed contour polygons (isolines) from regular 2D scalar grids, using the
//! marching squares algorithm.
//!
//! Given a flat row-major array of samples and a cutoff threshold, the crate
//! finds every region whose samples lie below the cutoff and emits its
//! boundary as nested polygon geometry: one outer shell per region, with
//! interior rings for holes, bundled into a single GeoJSON MultiPolygon
//! feature. Regions reaching the edge of the sampled area are force-closed
//! along the grid boundary, so rings always close.
//!
//! The pipeline is pure and strictly forward: a per-cell case grid is built
//! from the samples, rings are traced cell to cell (with saddle cells
//! disambiguated by entry direction), each edge crossing is linearly
//! interpolated and projected through a caller-supplied callback, and
//! finally hole rings are nested into their enclosing shells by winding sign
//! and point-in-polygon containment.
//!
//! ## Example
//!
//! ```rust
//! use grid_isolines::contour_polygons;
//!
//! // 4x4 grid with one below-cutoff sample in the interior.
//! let mut values = vec![10.0; 16];
//! values[1 * 4 + 1] = 0.0;
//!
//! // Identity projection keeps grid-space coordinates.
//! let feature = contour_polygons(&values, 4, 4, 5.0, |x, y| (x, y));
//!
//! // One diamond-shaped shell around the below-cutoff sample.
//! let geometry = feature.geometry.unwrap();
//! if let geojson::Value::MultiPolygon(polygons) = geometry.value {
//!     assert_eq!(polygons.len(), 1);
//! }
//! ```
//!
//! ## Failure behavior
//!
//! Nothing in the pipeline raises to the caller: malformed local topology
//! degrades into a missing ring or a dropped hole, surfaced as diagnostics.
//! By default diagnostics go to [`log::warn!`]; the
//! [`contour_polygons_with_diagnostics`] variant collects them into a `Vec`
//! so tests and callers can inspect them.
//!
//! ## Parallelism
//!
//! A single invocation is single-threaded and owns all its mutable state, so
//! independent invocations are safe to run concurrently.
//! [`contour_polygons_concurrent`] extracts several cutoff levels from one
//! shared grid on Rayon's thread pool.

mod case;
mod classifier;
mod contour;
mod diagnostics;
mod interpolate;
mod nest;
mod tracer;

pub use case::{CellCase, Move};
pub use classifier::case_grid;
pub use contour::{
    contour_polygons,
    contour_polygons_concurrent,
    contour_polygons_with_diagnostics,
    contour_polygons_with_options,
    ContourOptions,
    DEFAULT_MAX_RING_COORDINATES,
};
pub use diagnostics::Diagnostic;
