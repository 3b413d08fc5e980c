//! Arrow rendering component - paints filled polygons onto a canvas layer.

use gpui::{Bounds, Hsla, PathBuilder, Pixels, canvas, point, prelude::*, px, rgb};

use crate::domain::Point;

/// Render polygons on a canvas covering the whole board.
/// Points are in canvas space; the layer must be placed at the canvas origin.
pub fn render_polygons(polygons: Vec<(Vec<Point>, u32)>) -> impl IntoElement {
    canvas(
        |_, _, _| {},
        move |bounds: Bounds<Pixels>, _, window, _| {
            for (points, color) in &polygons {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                let to_window = |p: &Point| {
                    point(bounds.origin.x + px(p.x), bounds.origin.y + px(p.y))
                };

                let mut builder = PathBuilder::fill();
                builder.move_to(to_window(first));
                for p in rest {
                    builder.line_to(to_window(p));
                }
                builder.close();
                if let Ok(path) = builder.build() {
                    window.paint_path(path, Hsla::from(rgb(*color)));
                }
            }
        },
    )
    .absolute()
    .top_0()
    .left_0()
    .size_full()
}
