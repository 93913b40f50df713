//! Contour classifier: scalar grid in, per-cell case grid out.
//!
//! The case grid is the only thing the ring tracer looks at while walking.
//! It is stored as an arena-style flat buffer, one [`CellCase`] per cell,
//! row-major, `(width-1) × (height-1)` cells for a `width × height` grid of
//! sample points.

use crate::case::CellCase;

/// Flat row-major grid of marching squares cell cases.
#[derive(Debug, Clone)]
pub(crate) struct CaseGrid {
    cells: Vec<CellCase>,
    /// Cells per row (`grid width - 1`).
    pub(crate) width: usize,
    /// Cell rows (`grid height - 1`).
    pub(crate) height: usize,
}

impl CaseGrid {
    /// Classify every cell of the sample grid against `cutoff`.
    ///
    /// A corner is "below" iff its sample is strictly less than the cutoff.
    /// Cells touching the grid boundary have the corners on that side forced
    /// to "not below", so an isoline that would run off the sampled area is
    /// closed along the boundary instead of leaving a gap.
    pub(crate) fn classify(values: &[f64], width: usize, height: usize, cutoff: f64) -> Self {
        let cell_width = width - 1;
        let cell_height = height - 1;
        let mut cells = Vec::with_capacity(cell_width * cell_height);

        for y in 0..cell_height {
            for x in 0..cell_width {
                let mut tl = values[y * width + x] < cutoff;
                let mut tr = values[y * width + x + 1] < cutoff;
                let mut bl = values[(y + 1) * width + x] < cutoff;
                let mut br = values[(y + 1) * width + x + 1] < cutoff;

                // Edge-closing rule
                if x == 0 {
                    tl = false;
                    bl = false;
                }
                if x == cell_width - 1 {
                    tr = false;
                    br = false;
                }
                if y == 0 {
                    tl = false;
                    tr = false;
                }
                if y == cell_height - 1 {
                    bl = false;
                    br = false;
                }

                cells.push(CellCase::from_corners(tl, tr, br, bl));
            }
        }

        Self {
            cells,
            width: cell_width,
            height: cell_height,
        }
    }

    /// Build a case grid directly from packed case values.
    #[cfg(test)]
    pub(crate) fn from_bits(bits: &[u8], width: usize, height: usize) -> Self {
        assert_eq!(bits.len(), width * height);
        Self {
            cells: bits.iter().map(|&b| CellCase::from_bits(b)).collect(),
            width,
            height,
        }
    }

    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> CellCase {
        self.cells[y * self.width + x]
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Compute the raw per-cell case array for a grid (diagnostic entry point).
///
/// Returns the packed 4-bit case values, row-major, one per cell, so
/// `(width-1) × (height-1)` entries. Bit encoding: `tl(8) | tr(4) | br(2) |
/// bl(1)`, where a set bit means the corner sample is strictly below
/// `cutoff`, after the boundary edge-closing rule is applied.
///
/// # Panics
///
/// Panics if `width < 2`, `height < 2`, or `values.len() != width * height`.
pub fn case_grid(values: &[f64], width: usize, height: usize, cutoff: f64) -> Vec<u8> {
    assert!(width >= 2 && height >= 2, "grid must be at least 2x2");
    assert_eq!(
        values.len(),
        width * height,
        "values length must equal width * height"
    );
    CaseGrid::classify(values, width, height, cutoff)
        .cells
        .iter()
        .map(|case| case.bits())
        .collect()
}
