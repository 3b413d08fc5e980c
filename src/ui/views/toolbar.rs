//! Toolbar - piece palette, arrow color toggles and export controls.

use gpui::{
    App, ClipboardItem, Div, Entity, MouseButton, MouseDownEvent, SharedString, div, prelude::*,
    px, rgb,
};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::{PieceCode, Point};
use crate::models::{EditorModel, ExportModel, Mode, NoticeKind};
use crate::ui::components::render_piece_tile;
use crate::ui::display::render_frame;
use crate::ui::theme::{
    BORDER_COLOR, BoardTheme, NOTICE_ERROR, NOTICE_INFO, PANEL_PADDING, TEXT_PRIMARY,
    TEXT_SECONDARY, TILE_HOVER_BG, TOOL_TILE_SIZE, TOOLBAR_BG,
};
use super::board_view::window_point;

/// Render the toolbar next to the board
pub fn render_toolbar(
    editor: &Entity<EditorModel>,
    export: &Entity<ExportModel>,
    theme: &BoardTheme,
    cx: &App,
) -> Div {
    let toolbar = div()
        .flex_1()
        .min_w(px(200.0))
        .flex()
        .flex_col()
        .gap_3()
        .p_4()
        .bg(rgb(TOOLBAR_BG))
        .border_l_1()
        .border_color(rgb(BORDER_COLOR))
        .child(section_title("Pieces"))
        .child(render_piece_palette(editor))
        .child(section_title("Arrows"))
        .child(render_arrow_toggles(editor, theme, cx))
        .child(section_title("Export"))
        .child(render_export_buttons(editor, export, theme))
        .child(render_status(editor, export, cx));

    div().flex_1().flex().p(px(PANEL_PADDING)).pl_0().child(toolbar)
}

fn section_title(title: &'static str) -> impl IntoElement {
    div()
        .text_sm()
        .text_color(rgb(TEXT_SECONDARY))
        .child(title)
}

/// Two rows of tiles, dark pieces then light; pressing one starts placing a new piece
fn render_piece_palette(editor: &Entity<EditorModel>) -> impl IntoElement {
    let row = |codes: &[PieceCode]| {
        div().flex().gap_1().children(codes.iter().map(|&code| {
            let editor = editor.clone();
            render_piece_tile(code, TOOL_TILE_SIZE)
                .id(SharedString::from(format!("add-{code}")))
                .rounded_md()
                .hover(|style| style.bg(rgb(TILE_HOVER_BG)))
                .on_mouse_down(
                    MouseButton::Left,
                    move |ev: &MouseDownEvent, _window, cx| {
                        editor.update(cx, |editor, cx| {
                            let position = editor.to_local(window_point(ev.position));
                            // Hold the new piece by its middle
                            let half = editor.layout().cell_size() / 2.0;
                            if editor.begin_add_piece(code, Point::new(half, half), position) {
                                cx.notify();
                            }
                        });
                    },
                )
        }))
    };

    let codes: &[PieceCode] = &PieceCode::ALL;
    let (dark, light) = codes.split_at(6);
    div().flex().flex_col().gap_1().child(row(dark)).child(row(light))
}

/// One toggle per palette color; at most one is armed
fn render_arrow_toggles(
    editor: &Entity<EditorModel>,
    theme: &BoardTheme,
    cx: &App,
) -> impl IntoElement {
    let armed = editor.read(cx).armed_color().cloned();

    div()
        .flex()
        .flex_wrap()
        .gap_2()
        .children(theme.arrow_palette.iter().map(|color| {
            let editor = editor.clone();
            let toggled = color.clone();
            let button = Button::new(SharedString::from(format!("arrow-{}", color.name)))
                .label(color.name.clone())
                .compact();
            let button = if armed.as_ref() == Some(color) {
                button.primary()
            } else {
                button.ghost()
            };

            div()
                .flex()
                .items_center()
                .gap_1()
                .child(div().size(px(10.0)).rounded_full().bg(rgb(color.rgb)))
                .child(button.on_click(move |_, _, cx| {
                    editor.update(cx, |editor, cx| {
                        if editor.toggle_arrow_color(toggled.clone()) {
                            cx.notify();
                        }
                    });
                }))
        }))
}

fn render_export_buttons(
    editor: &Entity<EditorModel>,
    export: &Entity<ExportModel>,
    theme: &BoardTheme,
) -> impl IntoElement {
    let (editor_copy, export_copy, theme_copy) = (editor.clone(), export.clone(), theme.clone());
    let (editor_save, export_save, theme_save) = (editor.clone(), export.clone(), theme.clone());
    let (editor_capture, export_capture, theme_capture) =
        (editor.clone(), export.clone(), theme.clone());
    let export_finish = export.clone();

    div()
        .flex()
        .flex_wrap()
        .gap_2()
        .child(
            Button::new("copy-frame")
                .label("Copy")
                .compact()
                .on_click(move |_, _, cx| {
                    let frame = render_frame(editor_copy.read(cx), &theme_copy);
                    let image = export_copy.update(cx, |export, cx| {
                        let image = export.clipboard_image(&frame);
                        cx.notify();
                        image
                    });
                    cx.write_to_clipboard(ClipboardItem::new_image(&image));
                }),
        )
        .child(
            Button::new("save-frame")
                .label("Save")
                .compact()
                .on_click(move |_, _, cx| {
                    let frame = render_frame(editor_save.read(cx), &theme_save);
                    export_save.update(cx, |export, cx| {
                        // the outcome is reported through the notice
                        let _ = export.save_frame(&frame);
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("capture-frame")
                .label("Add frame")
                .compact()
                .on_click(move |_, _, cx| {
                    let frame = render_frame(editor_capture.read(cx), &theme_capture);
                    export_capture.update(cx, |export, cx| {
                        export.capture_frame(frame);
                        cx.notify();
                    });
                }),
        )
        .child(
            Button::new("finish-animation")
                .label("Save animation")
                .primary()
                .compact()
                .on_click(move |_, _, cx| {
                    export_finish.update(cx, |export, cx| {
                        let _ = export.finish_animation();
                        cx.notify();
                    });
                }),
        )
}

/// Current mode hint, captured frame count and the last export outcome
fn render_status(
    editor: &Entity<EditorModel>,
    export: &Entity<ExportModel>,
    cx: &App,
) -> impl IntoElement {
    let mode_text = match editor.read(cx).mode() {
        Mode::Idle => "Drag pieces; right-click removes".to_string(),
        Mode::DraggingPiece { .. } => "Moving piece".to_string(),
        Mode::PlacingNewPiece { .. } => "Drop the new piece on an empty square".to_string(),
        Mode::ArmedForArrow { color } | Mode::DrawingArrow { color, .. } => {
            format!("Drawing {} arrows", color.name)
        }
    };
    let export = export.read(cx);
    let frames = export.captured_frames();

    div()
        .flex()
        .flex_col()
        .gap_1()
        .text_xs()
        .child(div().text_color(rgb(TEXT_PRIMARY)).child(mode_text))
        .when(frames > 0, |el| {
            el.child(
                div()
                    .text_color(rgb(TEXT_SECONDARY))
                    .child(format!("{frames} frame(s) captured")),
            )
        })
        .when_some(export.notice().cloned(), |el, notice| {
            let color = match notice.kind {
                NoticeKind::Info => NOTICE_INFO,
                NoticeKind::Error => NOTICE_ERROR,
            };
            el.child(div().text_color(rgb(color)).child(notice.text))
        })
}
