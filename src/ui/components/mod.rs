mod arrow;
mod piece;
mod square;

pub use arrow::render_polygons;
pub use piece::{render_piece, render_piece_tile};
pub use square::{render_fill, render_label};
