pub mod assets;
pub mod components;
pub mod display;
pub mod theme;
pub mod view_models;
pub mod views;

pub use assets::{FileAssets, PieceAssets};
