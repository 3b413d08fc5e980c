//! Board layout calculations - maps between canvas pixels and board squares.
//!
//! The canvas has a rank-label strip on the left and a file-label strip on
//! top; the 8x8 grid of square cells sits below and to the right of them.

use shakmaty::{File, Rank, Square};

use crate::domain::geometry::Point;

/// Handles all coordinate conversions for the board canvas
#[derive(Clone, Debug, PartialEq)]
pub struct BoardLayout {
    cell_size: f32,
    left_margin: f32,
    top_margin: f32,
    /// Top-left corner of every square, indexed by square
    anchors: [Point; 64],
}

impl BoardLayout {
    pub fn new(cell_size: f32, left_margin: f32, top_margin: f32) -> Self {
        let mut anchors = [Point::default(); 64];
        for (index, anchor) in anchors.iter_mut().enumerate() {
            let sq = Square::new(index as u32);
            let col = u32::from(sq.file()) as f32;
            let row = (7 - u32::from(sq.rank())) as f32; // row 0 = rank 8
            *anchor = Point::new(left_margin + col * cell_size, top_margin + row * cell_size);
        }
        Self {
            cell_size,
            left_margin,
            top_margin,
            anchors,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Top-left pixel of a square
    pub fn cell_anchor(&self, sq: Square) -> Point {
        self.anchors[usize::from(sq)]
    }

    pub fn cell_center(&self, sq: Square) -> Point {
        let half = self.cell_size / 2.0;
        self.cell_anchor(sq) + Point::new(half, half)
    }

    /// Square under a canvas point, or `None` for anything outside the grid
    pub fn pixel_to_cell(&self, point: Point) -> Option<Square> {
        let col = ((point.x - self.left_margin) / self.cell_size).floor();
        let row = ((point.y - self.top_margin) / self.cell_size).floor();

        // NaN fails both range checks
        if !(0.0..8.0).contains(&col) || !(0.0..8.0).contains(&row) {
            return None;
        }

        let file = File::new(col as u32);
        let rank = Rank::new(7 - row as u32);
        Some(Square::from_coords(file, rank))
    }

    /// Side length of the 8x8 grid
    pub fn board_size(&self) -> f32 {
        self.cell_size * 8.0
    }

    /// Full canvas extent including label strips
    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.left_margin + self.board_size(),
            self.top_margin + self.board_size(),
        )
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(64.0, 20.0, 10.0)
    }
}
