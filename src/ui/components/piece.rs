//! Piece rendering component.

use gpui::{SharedString, div, img, prelude::*, px};

use crate::domain::PieceCode;
use crate::ui::view_models::Rect;

/// Render a piece glyph filling `rect`
pub fn render_piece(code: PieceCode, rect: Rect) -> impl IntoElement {
    div()
        .absolute()
        .left(px(rect.origin.x))
        .top(px(rect.origin.y))
        .w(px(rect.width))
        .h(px(rect.height))
        .child(img(SharedString::from(code.svg_path())).size_full())
}

/// Render a toolbar tile showing a piece glyph at `size`
pub fn render_piece_tile(code: PieceCode, size: f32) -> gpui::Div {
    div()
        .flex_shrink_0()
        .size(px(size))
        .flex()
        .items_center()
        .justify_center()
        .child(img(SharedString::from(code.svg_path())).size(px(size * 0.9)))
}
