//! Grid Generation
//!
//! Regular lon/lat grid over the study area. Cells are generated row-major
//! from the south-west corner, ids `cell_<row>_<col>`. Edge cells are
//! truncated so the grid never extends past the bounding box.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of cells one grid may hold
pub const MAX_GRID_CELLS: usize = 10_000_000;

/// Structural problems with grid parameters
#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    #[error("Cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    #[error("Bounding box is empty or inverted: {0:?}")]
    EmptyBoundingBox(BoundingBox),

    #[error("Grid of {rows} × {cols} cells exceeds the limit of {}", MAX_GRID_CELLS)]
    TooManyCells { rows: usize, cols: usize },
}

/// Axis-aligned lon/lat rectangle (degrees, WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self { min_lon, min_lat, max_lon, max_lat }
    }

    pub fn is_valid(&self) -> bool {
        let coords = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        coords.iter().all(|c| c.is_finite())
            && self.max_lon > self.min_lon
            && self.max_lat > self.min_lat
    }

    /// Closed polygon ring, counter-clockwise from the south-west corner
    pub fn ring(&self) -> [[f64; 2]; 5] {
        [
            [self.min_lon, self.min_lat],
            [self.max_lon, self.min_lat],
            [self.max_lon, self.max_lat],
            [self.min_lon, self.max_lat],
            [self.min_lon, self.min_lat],
        ]
    }
}

/// One generated grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub bounds: BoundingBox,
}

impl GridCell {
    pub fn ring(&self) -> [[f64; 2]; 5] {
        self.bounds.ring()
    }
}

/// Number of cells needed to span `extent`; ignores float slivers below 1e-9 of a cell
fn cells_along(extent: f64, cell_size: f64) -> usize {
    ((extent / cell_size - 1e-9).ceil() as usize).max(1)
}

/// Generate a regular grid of `cell_size_deg` cells covering `bbox`
pub fn generate_grid(bbox: &BoundingBox, cell_size_deg: f64) -> Result<Vec<GridCell>, GridError> {
    if !(cell_size_deg.is_finite() && cell_size_deg > 0.0) {
        return Err(GridError::InvalidCellSize(cell_size_deg));
    }
    if !bbox.is_valid() {
        return Err(GridError::EmptyBoundingBox(*bbox));
    }

    let n_cols = cells_along(bbox.max_lon - bbox.min_lon, cell_size_deg);
    let n_rows = cells_along(bbox.max_lat - bbox.min_lat, cell_size_deg);

    // `as usize` saturates for tiny cell sizes, so the product must be checked
    let n_cells = n_rows
        .checked_mul(n_cols)
        .filter(|&n| n <= MAX_GRID_CELLS)
        .ok_or(GridError::TooManyCells { rows: n_rows, cols: n_cols })?;

    let mut cells = Vec::with_capacity(n_cells);
    for row in 0..n_rows {
        let min_lat = bbox.min_lat + row as f64 * cell_size_deg;
        let max_lat = (min_lat + cell_size_deg).min(bbox.max_lat);

        for col in 0..n_cols {
            let min_lon = bbox.min_lon + col as f64 * cell_size_deg;
            let max_lon = (min_lon + cell_size_deg).min(bbox.max_lon);

            cells.push(GridCell {
                id: format!("cell_{}_{}", row, col),
                row,
                col,
                bounds: BoundingBox::new(min_lon, min_lat, max_lon, max_lat),
            });
        }
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_division() {
        let bbox = BoundingBox::new(60.0, 45.0, 61.0, 45.5);
        let cells = generate_grid(&bbox, 0.25).unwrap();

        // 4 columns × 2 rows
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0].id, "cell_0_0");
        assert_eq!(cells[7].id, "cell_1_3");
        assert_relative_eq!(cells[7].bounds.max_lon, 61.0, epsilon = 1e-12);
        assert_relative_eq!(cells[7].bounds.max_lat, 45.5, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_cells_truncated() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let cells = generate_grid(&bbox, 0.4).unwrap();

        // ceil(1.0 / 0.4) = 3 per axis
        assert_eq!(cells.len(), 9);
        let last = cells.last().unwrap();
        assert_eq!(last.bounds.max_lon, 1.0);
        assert_eq!(last.bounds.max_lat, 1.0);
        assert_relative_eq!(last.bounds.min_lon, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_ring_is_closed() {
        let ring = BoundingBox::new(1.0, 2.0, 3.0, 4.0).ring();
        assert_eq!(ring[0], ring[4]);
        assert_eq!(ring[2], [3.0, 4.0]);
    }

    #[test]
    fn test_invalid_input() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(generate_grid(&bbox, 0.0), Err(GridError::InvalidCellSize(0.0)));
        assert!(generate_grid(&bbox, f64::NAN).is_err());

        let inverted = BoundingBox::new(2.0, 0.0, 1.0, 1.0);
        assert_eq!(
            generate_grid(&inverted, 0.1),
            Err(GridError::EmptyBoundingBox(inverted))
        );
    }

    #[test]
    fn test_tiny_cell_size_is_rejected() {
        let bbox = BoundingBox::new(60.0, 45.0, 62.0, 46.5);

        // Cell counts saturate usize; must be an error, not an overflow panic
        match generate_grid(&bbox, 1e-300) {
            Err(GridError::TooManyCells { rows, cols }) => {
                assert_eq!(rows, usize::MAX);
                assert_eq!(cols, usize::MAX);
            }
            other => panic!("expected TooManyCells, got {:?}", other.map(|c| c.len())),
        }

        // 20000 × 15000 = 300M cells, over the limit
        assert!(matches!(
            generate_grid(&bbox, 0.0001),
            Err(GridError::TooManyCells { rows: 15_000, cols: 20_000 })
        ));
    }
}
