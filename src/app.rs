//! Application setup and window creation.

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;
use tracing::{error, info};

use crate::config::EditorConfig;
use crate::models::{EditorModel, ExportModel};
use crate::ui::PieceAssets;
use crate::ui::theme::PANEL_PADDING;
use crate::ui::views::BoardEditorView;

/// Room for the toolbar to the right of the board
const TOOLBAR_WIDTH: f32 = 300.0;

/// Initialize and run the board editor
pub fn run(cx: &mut App, config: EditorConfig, assets: PieceAssets) {
    gpui_component::init(cx);

    let layout = config.board_layout();
    let (canvas_width, canvas_height) = layout.canvas_size();

    let editor = cx.new(|_| EditorModel::with_standard_setup(layout, config.arrow.clone()));
    let export = cx.new(|_| {
        ExportModel::new(assets, config.export_dir.clone(), config.animation_frame_ms)
    });

    let width = canvas_width + PANEL_PADDING * 2.0 + TOOLBAR_WIDTH;
    let height = canvas_height + PANEL_PADDING * 2.0;
    let bounds = Bounds::centered(None, size(px(width), px(height)), cx);
    let theme = config.theme;

    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| BoardEditorView::new(editor, export, theme, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );

    match opened {
        Ok(_) => info!(width, height, "editor window opened"),
        Err(err) => {
            error!("failed to open editor window: {err:#}");
            cx.quit();
        }
    }
}
