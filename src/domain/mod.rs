pub mod board_layout;
pub mod chess;
pub mod geometry;
pub mod scene;

pub use board_layout::BoardLayout;
pub use chess::{PieceCode, PieceColor, PieceKind, cell_name, parse_cell, standard_layout};
pub use geometry::{ArrowStyle, Point};
pub use scene::{Arrow, ArrowCollection, ArrowColor, ArrowId, Piece, PieceCollection, PieceId};
