//! Pipeline entry points: scalar grid in, nested polygon geometry out.
//!
//! One invocation runs the four stages to completion: classify the grid into
//! cell cases, trace closed rings, interpolate and project every crossing,
//! then nest hole rings into their shells. All mutable state is local to the
//! invocation, so independent invocations can run in parallel;
//! [`contour_polygons_concurrent`] does exactly that across cutoffs.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};

use crate::classifier::CaseGrid;
use crate::diagnostics::Diagnostic;
use crate::nest::nest_rings;
use crate::tracer::{trace_rings, TraceContext};

/// Default per-ring coordinate cap.
pub const DEFAULT_MAX_RING_COORDINATES: usize = 16_384;

/// Tuning knobs for a contour invocation.
#[derive(Debug, Clone)]
pub struct ContourOptions {
    /// Linear interpolation of crossing points. When disabled every emitted
    /// vertex sits at a cell-edge midpoint, regardless of sample values.
    pub interpolate: bool,
    /// Safety cap on coordinates per ring; a ring that grows past this is
    /// discarded rather than truncated.
    pub max_ring_coordinates: usize,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            interpolate: true,
            max_ring_coordinates: DEFAULT_MAX_RING_COORDINATES,
        }
    }
}

fn check_grid(values: &[f64], width: usize, height: usize) {
    assert!(width >= 2 && height >= 2, "grid must be at least 2x2");
    assert_eq!(
        values.len(),
        width * height,
        "values length must equal width * height"
    );
}

/// Shared pipeline body behind the public variants.
fn contour_polygons_inner<P, F>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoff: f64,
    options: &ContourOptions,
    project: &P,
    diag: &mut F,
) -> Feature
where
    P: Fn(f64, f64) -> (f64, f64),
    F: FnMut(Diagnostic),
{
    let cases = CaseGrid::classify(values, width, height, cutoff);

    let ctx = TraceContext {
        values,
        width,
        height,
        cutoff,
        interpolate: options.interpolate,
        max_ring_coordinates: options.max_ring_coordinates,
    };

    let rings = trace_rings(&cases, &ctx, project, diag);
    let polygons = nest_rings(rings, diag);

    let mut feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::MultiPolygon(polygons))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    };

    if let Some(props) = feature.properties.as_mut() {
        props.insert("cutoff".to_string(), serde_json::json!(cutoff));
    }

    feature
}

/// Extract closed contour polygons from a scalar grid at `cutoff`.
///
/// `values` is a flat row-major array of `width * height` samples over a
/// regular lattice of grid points. Every region of below-cutoff samples
/// becomes one polygon: an outer shell ring plus zero or more interior hole
/// rings, bundled into a MultiPolygon feature tagged with a `"cutoff"`
/// property. Regions touching the grid boundary are force-closed along it.
///
/// `project` maps each grid-space vertex to the caller's output coordinate
/// space (for example a CRS conversion); it is called once per emitted
/// vertex.
///
/// Local anomalies (broken rings, oversized rings, unmatched holes) degrade
/// into missing geometry and are reported through [`log::warn!`]; the call
/// itself never fails. Use [`contour_polygons_with_diagnostics`] to capture
/// them instead.
///
/// # Panics
///
/// Panics if `width < 2`, `height < 2`, or `values.len() != width * height`.
pub fn contour_polygons<P>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoff: f64,
    project: P,
) -> Feature
where
    P: Fn(f64, f64) -> (f64, f64),
{
    contour_polygons_with_options(values, width, height, cutoff, &ContourOptions::default(), project)
}

/// [`contour_polygons`] with explicit [`ContourOptions`].
///
/// # Panics
///
/// Panics if `width < 2`, `height < 2`, or `values.len() != width * height`.
pub fn contour_polygons_with_options<P>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoff: f64,
    options: &ContourOptions,
    project: P,
) -> Feature
where
    P: Fn(f64, f64) -> (f64, f64),
{
    check_grid(values, width, height);
    contour_polygons_inner(values, width, height, cutoff, options, &project, &mut |d| {
        log::warn!("{d}");
    })
}

/// [`contour_polygons_with_options`] that collects diagnostics into
/// `diagnostics` instead of logging them.
///
/// # Panics
///
/// Panics if `width < 2`, `height < 2`, or `values.len() != width * height`.
pub fn contour_polygons_with_diagnostics<P>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoff: f64,
    options: &ContourOptions,
    project: P,
    diagnostics: &mut Vec<Diagnostic>,
) -> Feature
where
    P: Fn(f64, f64) -> (f64, f64),
{
    check_grid(values, width, height);
    contour_polygons_inner(values, width, height, cutoff, options, &project, &mut |d| {
        diagnostics.push(d)
    })
}

/// True when the feature carries a non-empty MultiPolygon.
fn has_coordinates(feature: &Feature) -> bool {
    match &feature.geometry {
        Some(geometry) => match &geometry.value {
            GeoValue::MultiPolygon(polygons) => !polygons.is_empty(),
            _ => false,
        },
        None => false,
    }
}

/// Run [`contour_polygons_with_options`] for several cutoffs in parallel.
///
/// Each cutoff is one independent invocation on the shared read-only grid,
/// computed on Rayon's thread pool. Cutoffs that produce no geometry are
/// filtered out; feature order follows the input cutoff order. Diagnostics go
/// to [`log::warn!`].
///
/// # Panics
///
/// Panics if `width < 2`, `height < 2`, or `values.len() != width * height`.
pub fn contour_polygons_concurrent<P>(
    values: &[f64],
    width: usize,
    height: usize,
    cutoffs: &[f64],
    options: &ContourOptions,
    project: P,
) -> FeatureCollection
where
    P: Fn(f64, f64) -> (f64, f64) + Sync,
{
    use rayon::prelude::*;

    check_grid(values, width, height);

    let features: Vec<Feature> = cutoffs
        .par_iter()
        .map(|&cutoff| {
            contour_polygons_inner(values, width, height, cutoff, options, &project, &mut |d| {
                log::warn!("{d}");
            })
        })
        .filter(has_coordinates)
        .collect();

    FeatureCollection {
        bbox: None,
        foreign_members: None,
        features,
    }
}
