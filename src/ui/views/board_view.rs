//! Board editor view - paints the current frame and feeds pointer input to the editor model.

use gpui::{
    AnyElement, Context, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent,
    Subscription, Window, canvas, div, prelude::*, px, rgb,
};

use crate::domain::Point;
use crate::models::{EditorModel, ExportModel, PointerButton, PointerEvent};
use crate::ui::components::{render_fill, render_label, render_piece, render_polygons};
use crate::ui::display::render_frame;
use crate::ui::theme::{BoardTheme, PANEL_BG, PANEL_PADDING};
use crate::ui::view_models::{DrawCommand, Frame};
use crate::ui::views::render_toolbar;

/// The main editor view that observes the editor and export models
pub struct BoardEditorView {
    editor: Entity<EditorModel>,
    export: Entity<ExportModel>,
    theme: BoardTheme,
    _subscriptions: Vec<Subscription>,
}

impl BoardEditorView {
    pub fn new(
        editor: Entity<EditorModel>,
        export: Entity<ExportModel>,
        theme: BoardTheme,
        cx: &mut Context<Self>,
    ) -> Self {
        let _subscriptions = vec![
            cx.observe(&editor, |_, _, cx| cx.notify()),
            cx.observe(&export, |_, _, cx| cx.notify()),
        ];
        Self {
            editor,
            export,
            theme,
            _subscriptions,
        }
    }
}

pub(crate) fn window_point(position: gpui::Point<gpui::Pixels>) -> Point {
    Point::new(position.x.into(), position.y.into())
}

/// Forward a pointer event at a window position to the editor, repainting if it changed anything
fn dispatch(
    editor: &Entity<EditorModel>,
    cx: &mut gpui::App,
    position: gpui::Point<gpui::Pixels>,
    event: impl FnOnce(Point) -> PointerEvent,
) {
    editor.update(cx, |editor, cx| {
        let local = editor.to_local(window_point(position));
        if editor.handle(event(local)) {
            cx.notify();
        }
    });
}

/// Turn the display list into absolutely positioned elements, in paint order.
/// Consecutive polygons share one canvas layer.
fn frame_elements(frame: &Frame) -> Vec<AnyElement> {
    let mut elements = Vec::with_capacity(frame.commands.len());
    let mut polygons = Vec::new();

    for command in &frame.commands {
        if let DrawCommand::Polygon { points, color } = command {
            polygons.push((points.clone(), *color));
            continue;
        }
        if !polygons.is_empty() {
            elements.push(render_polygons(std::mem::take(&mut polygons)).into_any_element());
        }
        let element = match command {
            DrawCommand::FillRect { rect, color } => render_fill(*rect, *color).into_any_element(),
            DrawCommand::Label { rect, text, color } => {
                render_label(*rect, text.clone(), *color).into_any_element()
            }
            DrawCommand::Piece { code, rect } => render_piece(*code, *rect).into_any_element(),
            DrawCommand::Polygon { .. } => continue,
        };
        elements.push(element);
    }
    if !polygons.is_empty() {
        elements.push(render_polygons(polygons).into_any_element());
    }
    elements
}

impl Render for BoardEditorView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let editor_down = self.editor.clone();
        let editor_secondary = self.editor.clone();
        let editor_move = self.editor.clone();
        let editor_up = self.editor.clone();
        let editor_measure = self.editor.clone();

        let frame = render_frame(self.editor.read(cx), &self.theme);

        // Canvas to measure where the board sits in the window
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                editor_measure.update(cx, |editor, cx| {
                    if editor.set_board_origin(window_point(bounds.origin)) {
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        let board = div()
            .id("board-canvas")
            .relative()
            .flex_shrink_0()
            .w(px(frame.width))
            .h(px(frame.height))
            .overflow_hidden()
            .child(measure_canvas)
            .children(frame_elements(&frame))
            // Primary press: pick up a piece or start an arrow
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    dispatch(&editor_down, cx, ev.position, |position| PointerEvent::Down {
                        button: PointerButton::Primary,
                        position,
                    });
                },
            )
            // Secondary press: delete the arrow or piece under the pointer
            .on_mouse_down(
                MouseButton::Right,
                move |ev: &MouseDownEvent, _window, cx| {
                    dispatch(&editor_secondary, cx, ev.position, |position| {
                        PointerEvent::Down {
                            button: PointerButton::Secondary,
                            position,
                        }
                    });
                },
            );

        let toolbar = render_toolbar(&self.editor, &self.export, &self.theme, cx);

        // Move and release are tracked over the whole window so pieces taken
        // from the toolbar can be dragged onto the board
        div()
            .size_full()
            .flex()
            .bg(rgb(PANEL_BG))
            .on_mouse_move(move |ev: &MouseMoveEvent, _window, cx| {
                dispatch(&editor_move, cx, ev.position, |position| {
                    PointerEvent::Move { position }
                });
            })
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                dispatch(&editor_up, cx, ev.position, |position| PointerEvent::Up {
                    button: PointerButton::Primary,
                    position,
                });
            })
            .child(div().flex_shrink_0().p(px(PANEL_PADDING)).child(board))
            .child(toolbar)
    }
}
