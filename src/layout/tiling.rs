use crate::geometry::ScalingState;

/// One copy of the original rectangle inside the scaled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    /// 1-based label, row-major.
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// Lower-left corner in data units.
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl TileCell {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Partition of the scaled rectangle into `factor × factor` copies of the original.
#[derive(Debug, Clone)]
pub struct Tiling {
    pub factor: u32,
    pub width: f64,
    pub height: f64,
    pub cells: Vec<TileCell>,
}

impl Tiling {
    /// Number of copies, `factor²`.
    pub fn copies(&self) -> u32 {
        self.factor * self.factor
    }
}

/// Tile the scaled rectangle with copies of the original.
///
/// Returns `None` for fractional scale factors; no partial tiling is produced.
pub fn compute_tiling(state: &ScalingState) -> Option<Tiling> {
    let factor = state.whole_factor()?;
    let (w, h) = (state.original_width, state.original_height);

    let mut cells = Vec::with_capacity((factor * factor) as usize);
    let mut index = 1;
    for row in 0..factor {
        for col in 0..factor {
            cells.push(TileCell {
                index,
                row,
                col,
                x: f64::from(col) * w,
                y: f64::from(row) * h,
                w,
                h,
            });
            index += 1;
        }
    }

    Some(Tiling {
        factor,
        width: state.scaled_width,
        height: state.scaled_height,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_scale_produces_nine_numbered_cells() {
        let tiling = compute_tiling(&ScalingState::compute(3.0)).unwrap();
        assert_eq!(tiling.copies(), 9);
        let labels: Vec<u32> = tiling.cells.iter().map(|c| c.index).collect();
        assert_eq!(labels, (1..=9).collect::<Vec<_>>());

        let first = tiling.cells[0];
        assert_eq!((first.row, first.col, first.x, first.y), (0, 0, 0.0, 0.0));
        let last = tiling.cells[8];
        assert_eq!((last.row, last.col, last.x, last.y), (2, 2, 8.0, 6.0));
    }

    #[test]
    fn cells_are_row_major() {
        let tiling = compute_tiling(&ScalingState::compute(2.0)).unwrap();
        let order: Vec<(u32, u32)> = tiling.cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(tiling.cells[1].x, 4.0);
        assert_eq!(tiling.cells[2].y, 3.0);
    }

    #[test]
    fn fractional_factor_has_no_tiling() {
        assert!(compute_tiling(&ScalingState::compute(2.5)).is_none());
        assert!(compute_tiling(&ScalingState::compute(1.5)).is_none());
    }

    #[test]
    fn cells_cover_scaled_rectangle_without_overlap() {
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let state = ScalingState::compute(s);
            let tiling = compute_tiling(&state).unwrap();
            let covered: f64 = tiling.cells.iter().map(|c| c.w * c.h).sum();
            assert!((covered - state.scaled_area).abs() < 1e-9);
            for cell in &tiling.cells {
                assert!(cell.x + cell.w <= tiling.width + 1e-9);
                assert!(cell.y + cell.h <= tiling.height + 1e-9);
            }
            for (i, a) in tiling.cells.iter().enumerate() {
                for b in &tiling.cells[i + 1..] {
                    let disjoint = a.x + a.w <= b.x
                        || b.x + b.w <= a.x
                        || a.y + a.h <= b.y
                        || b.y + b.h <= a.y;
                    assert!(disjoint, "cells {} and {} overlap", a.index, b.index);
                }
            }
        }
    }

    #[test]
    fn center_is_cell_midpoint() {
        let tiling = compute_tiling(&ScalingState::compute(1.0)).unwrap();
        assert_eq!(tiling.cells[0].center(), (2.0, 1.5));
    }
}
