//! Square and label rendering components.

use gpui::{div, prelude::*, px, rgb};

use crate::ui::view_models::Rect;

/// Render a solid rectangle at its canvas position
pub fn render_fill(rect: Rect, color: u32) -> impl IntoElement {
    div()
        .absolute()
        .left(px(rect.origin.x))
        .top(px(rect.origin.y))
        .w(px(rect.width))
        .h(px(rect.height))
        .bg(rgb(color))
}

/// Render text centered in `rect`
pub fn render_label(rect: Rect, text: String, color: u32) -> impl IntoElement {
    div()
        .absolute()
        .left(px(rect.origin.x))
        .top(px(rect.origin.y))
        .w(px(rect.width))
        .h(px(rect.height))
        .flex()
        .items_center()
        .justify_center()
        .overflow_hidden()
        .text_size(px(rect.width.min(rect.height) * 0.8))
        .line_height(px(rect.height))
        .text_color(rgb(color))
        .child(text)
}
