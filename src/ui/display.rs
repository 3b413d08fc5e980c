//! Render pass - turns editor state into a display list.
//!
//! This module only reads the editor model; calling [`render_frame`] twice on
//! unchanged state yields equal frames.

use shakmaty::{File, Rank, Square};

use crate::domain::Piece;
use crate::domain::geometry::arrow_outline;
use crate::models::EditorModel;
use crate::ui::theme::BoardTheme;
use crate::ui::view_models::{DrawCommand, Frame, Rect};

/// Build the full frame for the current editor state
pub fn render_frame(editor: &EditorModel, theme: &BoardTheme) -> Frame {
    let layout = editor.layout();
    let (width, height) = layout.canvas_size();
    let mut commands = Vec::new();

    commands.push(DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, width, height),
        color: theme.background,
    });
    push_labels(&mut commands, editor, theme);
    push_squares(&mut commands, editor, theme);
    push_pieces(&mut commands, editor);
    push_arrows(&mut commands, editor, theme);

    Frame {
        width,
        height,
        commands,
    }
}

/// Rank numbers down the left strip, file letters along the top strip.
/// Each label cell is filled with the opposite color of the square beside it,
/// and its text is drawn in the neighbouring square's color.
fn push_labels(commands: &mut Vec<DrawCommand>, editor: &EditorModel, theme: &BoardTheme) {
    let layout = editor.layout();
    let cell = layout.cell_size();
    let left = layout.left_margin();
    let top = layout.top_margin();

    for index in 0..8u32 {
        // rank labels, 8 at the top
        let rank = 7 - index;
        let fill = theme.square_color(1, rank);
        let text_color = theme.square_color(0, rank);
        if left > 0.0 {
            let rect = Rect::new(0.0, top + index as f32 * cell, left, cell);
            commands.push(DrawCommand::FillRect { rect, color: fill });
            commands.push(DrawCommand::Label {
                rect,
                text: Rank::new(rank).char().to_string(),
                color: text_color,
            });
        }

        // file labels, A on the left
        let file = index;
        let fill = theme.square_color(file, 0);
        let text_color = theme.square_color(file, 1);
        if top > 0.0 {
            let rect = Rect::new(left + index as f32 * cell, 0.0, cell, top);
            commands.push(DrawCommand::FillRect { rect, color: fill });
            commands.push(DrawCommand::Label {
                rect,
                text: File::new(file).char().to_ascii_uppercase().to_string(),
                color: text_color,
            });
        }
    }
}

fn push_squares(commands: &mut Vec<DrawCommand>, editor: &EditorModel, theme: &BoardTheme) {
    let layout = editor.layout();
    let cell = layout.cell_size();
    for sq in (0..64).map(Square::new) {
        let anchor = layout.cell_anchor(sq);
        commands.push(DrawCommand::FillRect {
            rect: Rect::new(anchor.x, anchor.y, cell, cell),
            color: theme.square_color(u32::from(sq.file()), u32::from(sq.rank())),
        });
    }
}

/// Pieces in insertion order, with the piece under the pointer painted last
fn push_pieces(commands: &mut Vec<DrawCommand>, editor: &EditorModel) {
    let cell = editor.layout().cell_size();
    let active = editor.active_piece();
    let piece_command = |piece: &Piece| {
        let pos = piece.position();
        DrawCommand::Piece {
            code: piece.code,
            rect: Rect::new(pos.x, pos.y, cell, cell),
        }
    };

    commands.extend(
        editor
            .pieces()
            .iter()
            .filter(|p| Some(p.id()) != active)
            .map(&piece_command),
    );
    if let Some(piece) = active.and_then(|id| editor.pieces().get(id)) {
        commands.push(piece_command(piece));
    }
}

fn push_arrows(commands: &mut Vec<DrawCommand>, editor: &EditorModel, theme: &BoardTheme) {
    let layout = editor.layout();
    for arrow in editor.arrows().iter() {
        let Some(end) = arrow.drawable_end() else {
            continue;
        };
        let Some(outline) = arrow_outline(
            layout.cell_center(arrow.start()),
            layout.cell_center(end),
            editor.arrow_style(),
        ) else {
            continue;
        };
        let color = if arrow.highlighted {
            theme.highlight
        } else {
            arrow.color.rgb
        };
        commands.push(DrawCommand::Polygon {
            points: outline.shaft,
            color,
        });
        commands.push(DrawCommand::Polygon {
            points: outline.head.to_vec(),
            color,
        });
    }
}
