//! Editor model - the interaction state machine over the board scene.
//!
//! Pointer events and control actions come in here, mutate the scene and the
//! current [`Mode`], and report whether anything visible changed. No I/O
//! happens in this module.

use tracing::debug;

use crate::domain::{
    ArrowCollection, ArrowColor, ArrowId, ArrowStyle, BoardLayout, PieceCode, PieceCollection,
    PieceId, Point, cell_name, standard_layout,
};

/// What the pointer is currently doing
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Idle,
    /// Moving a piece that already sits on the board
    DraggingPiece { piece: PieceId, grab: Point },
    /// Moving a piece just taken from an "add piece" control
    PlacingNewPiece { piece: PieceId, grab: Point },
    /// An arrow color is selected; presses start new arrows
    ArmedForArrow { color: ArrowColor },
    /// Button held while drawing an arrow; returns to armed on release
    DrawingArrow { color: ArrowColor, arrow: ArrowId },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Pointer input in canvas-local coordinates
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PointerEvent {
    Down { button: PointerButton, position: Point },
    Move { position: Point },
    Up { button: PointerButton, position: Point },
}

/// The editor state: scene contents plus the interaction mode
pub struct EditorModel {
    layout: BoardLayout,
    arrow_style: ArrowStyle,
    pieces: PieceCollection,
    arrows: ArrowCollection,
    mode: Mode,
    /// Window position of the canvas origin, as last measured by the view
    board_origin: Point,
}

impl EditorModel {
    /// An empty board
    pub fn new(layout: BoardLayout, arrow_style: ArrowStyle) -> Self {
        Self {
            layout,
            arrow_style,
            pieces: PieceCollection::new(),
            arrows: ArrowCollection::new(),
            mode: Mode::Idle,
            board_origin: Point::default(),
        }
    }

    /// A board with the standard 32-piece starting layout
    pub fn with_standard_setup(layout: BoardLayout, arrow_style: ArrowStyle) -> Self {
        let mut editor = Self::new(layout, arrow_style);
        for (code, sq) in standard_layout() {
            editor.pieces.add_placed(code, sq, &editor.layout);
        }
        editor
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn arrow_style(&self) -> &ArrowStyle {
        &self.arrow_style
    }

    pub fn pieces(&self) -> &PieceCollection {
        &self.pieces
    }

    pub fn arrows(&self) -> &ArrowCollection {
        &self.arrows
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The piece following the pointer, if any
    pub fn active_piece(&self) -> Option<PieceId> {
        match self.mode {
            Mode::DraggingPiece { piece, .. } | Mode::PlacingNewPiece { piece, .. } => Some(piece),
            _ => None,
        }
    }

    /// The color arrows are currently drawn with, if arrow mode is armed
    pub fn armed_color(&self) -> Option<&ArrowColor> {
        match &self.mode {
            Mode::ArmedForArrow { color } | Mode::DrawingArrow { color, .. } => Some(color),
            _ => None,
        }
    }

    /// Record where the canvas sits in the window. Returns whether it moved.
    pub fn set_board_origin(&mut self, origin: Point) -> bool {
        let changed = self.board_origin != origin;
        self.board_origin = origin;
        changed
    }

    /// Convert a window position to canvas-local coordinates
    pub fn to_local(&self, window_position: Point) -> Point {
        window_position - self.board_origin
    }

    /// Dispatch a pointer event. Returns whether anything visible changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                button: PointerButton::Primary,
                position,
            } => self.primary_down(position),
            PointerEvent::Down {
                button: PointerButton::Secondary,
                position,
            } => self.secondary_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up {
                button: PointerButton::Primary,
                position,
            } => self.primary_up(position),
            PointerEvent::Up {
                button: PointerButton::Secondary,
                ..
            } => false,
        }
    }

    pub fn primary_down(&mut self, position: Point) -> bool {
        match &self.mode {
            Mode::Idle => {
                let Some(sq) = self.layout.pixel_to_cell(position) else {
                    return false;
                };
                let Some(piece) = self.pieces.find_at(sq) else {
                    return false;
                };
                let grab = position - self.layout.cell_anchor(sq);
                debug!(square = %cell_name(sq), code = %piece.code, "drag started");
                self.mode = Mode::DraggingPiece {
                    piece: piece.id(),
                    grab,
                };
                true
            }
            Mode::ArmedForArrow { color } => {
                let Some(sq) = self.layout.pixel_to_cell(position) else {
                    return false;
                };
                let color = color.clone();
                let arrow = self.arrows.add(sq, color.clone());
                debug!(start = %cell_name(sq), color = %color.name, "arrow started");
                self.mode = Mode::DrawingArrow { color, arrow };
                true
            }
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, position: Point) -> bool {
        match &self.mode {
            Mode::DraggingPiece { piece, grab } | Mode::PlacingNewPiece { piece, grab } => {
                let target = position - *grab;
                match self.pieces.get_mut(*piece) {
                    Some(p) if p.position() != target => {
                        p.move_to(target);
                        true
                    }
                    _ => false,
                }
            }
            Mode::DrawingArrow { arrow, .. } => {
                // Leaving the grid keeps the last square pointed at
                let Some(sq) = self.layout.pixel_to_cell(position) else {
                    return false;
                };
                self.arrows
                    .get_mut(*arrow)
                    .is_some_and(|a| a.set_end(sq))
            }
            Mode::Idle => self
                .arrows
                .update_highlights(position, &self.layout, &self.arrow_style),
            Mode::ArmedForArrow { .. } => false,
        }
    }

    pub fn primary_up(&mut self, position: Point) -> bool {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::DraggingPiece { piece, .. } => {
                self.drop_piece(piece, position, false);
                self.arrows
                    .update_highlights(position, &self.layout, &self.arrow_style);
                true
            }
            Mode::PlacingNewPiece { piece, .. } => {
                self.drop_piece(piece, position, true);
                self.arrows
                    .update_highlights(position, &self.layout, &self.arrow_style);
                true
            }
            Mode::DrawingArrow { color, arrow } => {
                let degenerate = self
                    .arrows
                    .get(arrow)
                    .is_some_and(|a| a.drawable_end().is_none());
                if degenerate {
                    self.arrows.remove(arrow);
                    debug!("zero-length arrow discarded");
                } else {
                    debug!(arrows = self.arrows.len(), "arrow finished");
                }
                self.mode = Mode::ArmedForArrow { color };
                true
            }
            other => {
                self.mode = other;
                false
            }
        }
    }

    /// Resolve a drop. A new piece landing anywhere but an empty square is
    /// discarded; an existing piece snaps back to its square instead.
    fn drop_piece(&mut self, piece: PieceId, position: Point, is_new: bool) {
        let target = self.layout.pixel_to_cell(position).filter(|sq| {
            self.pieces
                .find_at(*sq)
                .is_none_or(|occupant| occupant.id() == piece)
        });

        match (target, is_new) {
            (Some(sq), _) => {
                if let Some(p) = self.pieces.get_mut(piece) {
                    p.place(sq, &self.layout);
                    debug!(square = %cell_name(sq), code = %p.code, "piece dropped");
                }
            }
            (None, true) => {
                self.pieces.remove(piece);
                debug!("new piece discarded");
            }
            (None, false) => {
                if let Some(p) = self.pieces.get_mut(piece) {
                    p.snap_back(&self.layout);
                    debug!(code = %p.code, "drop rejected, piece returned");
                }
            }
        }
    }

    /// Secondary press: delete the arrow under the pointer, otherwise the
    /// piece on the pressed square. Only acts while idle.
    pub fn secondary_down(&mut self, position: Point) -> bool {
        if self.mode != Mode::Idle {
            return false;
        }

        self.arrows
            .update_highlights(position, &self.layout, &self.arrow_style);
        if self.arrows.remove_highlighted() {
            debug!("arrow removed");
            return true;
        }

        let Some(sq) = self.layout.pixel_to_cell(position) else {
            return false;
        };
        match self.pieces.remove_at(sq) {
            Some(removed) => {
                debug!(square = %cell_name(sq), code = %removed.code, "piece removed");
                true
            }
            None => false,
        }
    }

    /// Flip an arrow color control. Selecting a color disarms any other; selecting
    /// the armed color again disarms arrow mode.
    pub fn toggle_arrow_color(&mut self, color: ArrowColor) -> bool {
        match &self.mode {
            Mode::ArmedForArrow { color: armed } if *armed == color => {
                debug!(color = %color.name, "arrow mode disarmed");
                self.mode = Mode::Idle;
                true
            }
            Mode::Idle | Mode::ArmedForArrow { .. } => {
                self.arrows.clear_highlights();
                debug!(color = %color.name, "arrow mode armed");
                self.mode = Mode::ArmedForArrow { color };
                true
            }
            _ => false,
        }
    }

    /// Take a new piece from an "add piece" control. `grab` is the pointer's
    /// offset inside the piece and `position` the pointer in canvas space.
    /// Arrow mode is disarmed.
    pub fn begin_add_piece(&mut self, code: PieceCode, grab: Point, position: Point) -> bool {
        match self.mode {
            Mode::Idle | Mode::ArmedForArrow { .. } => {
                let piece = self.pieces.add_unplaced(code, position - grab);
                debug!(%code, "placing new piece");
                self.mode = Mode::PlacingNewPiece { piece, grab };
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    use crate::domain::{PieceColor, PieceKind, parse_cell};

    fn code_at(editor: &EditorModel, sq: Square) -> Option<PieceCode> {
        editor.pieces().find_at(sq).map(|p| p.code)
    }

    fn editor() -> EditorModel {
        EditorModel::with_standard_setup(BoardLayout::default(), ArrowStyle::default())
    }

    fn sq(name: &str) -> Square {
        parse_cell(name).unwrap()
    }

    /// A point a little inside the given square
    fn at(editor: &EditorModel, name: &str) -> Point {
        editor.layout().cell_anchor(sq(name)) + Point::new(10.0, 12.0)
    }

    fn red() -> ArrowColor {
        ArrowColor::new("red", 0xff0000)
    }

    fn drag(editor: &mut EditorModel, from: &str, to: &str) {
        let start = at(editor, from);
        let end = at(editor, to);
        assert!(editor.primary_down(start));
        editor.pointer_move(end);
        editor.primary_up(end);
    }

    fn placements(editor: &EditorModel) -> Vec<(PieceCode, Option<Square>)> {
        editor.pieces().iter().map(|p| (p.code, p.placed())).collect()
    }

    #[test]
    fn test_drag_e2_to_e4() {
        let mut editor = editor();
        let pawn = editor.pieces().find_at(sq("E2")).unwrap().id();

        drag(&mut editor, "E2", "E4");

        assert_eq!(editor.pieces().find_at(sq("E4")).map(|p| p.id()), Some(pawn));
        assert!(editor.pieces().find_at(sq("E2")).is_none());
        assert_eq!(editor.mode(), &Mode::Idle);
        let placed = editor.pieces().get(pawn).unwrap();
        assert_eq!(placed.position(), editor.layout().cell_anchor(sq("E4")));
    }

    #[test]
    fn test_drag_follows_pointer_with_grab_offset() {
        let mut editor = editor();
        let start = at(&editor, "B1");
        editor.primary_down(start);
        let Mode::DraggingPiece { piece, grab } = editor.mode().clone() else {
            panic!("expected drag");
        };
        assert_eq!(grab, Point::new(10.0, 12.0));

        let pointer = Point::new(300.0, 222.0);
        assert!(editor.pointer_move(pointer));
        assert_eq!(editor.pieces().get(piece).unwrap().position(), pointer - grab);
        // Still committed to the original square until dropped
        assert_eq!(editor.pieces().get(piece).unwrap().placed(), Some(sq("B1")));
    }

    #[test]
    fn test_drop_on_own_square_keeps_scene() {
        let mut editor = editor();
        let before = placements(&editor);
        drag(&mut editor, "D1", "D1");
        assert_eq!(placements(&editor), before);
    }

    #[test]
    fn test_drop_on_occupied_square_is_rejected() {
        let mut editor = editor();
        let knight = editor.pieces().find_at(sq("G1")).unwrap().id();
        let before = placements(&editor);

        drag(&mut editor, "G1", "E2");

        let piece = editor.pieces().get(knight).unwrap();
        assert_eq!(piece.placed(), Some(sq("G1")));
        assert_eq!(piece.position(), editor.layout().cell_anchor(sq("G1")));
        assert_eq!(placements(&editor), before);
    }

    #[test]
    fn test_drop_off_board_snaps_back() {
        let mut editor = editor();
        let queen = editor.pieces().find_at(sq("D8")).unwrap().id();
        editor.primary_down(at(&editor, "D8"));
        editor.pointer_move(Point::new(900.0, 900.0));
        editor.primary_up(Point::new(900.0, 900.0));

        let piece = editor.pieces().get(queen).unwrap();
        assert_eq!(piece.placed(), Some(sq("D8")));
        assert_eq!(piece.position(), editor.layout().cell_anchor(sq("D8")));
    }

    #[test]
    fn test_press_on_empty_square_is_noop() {
        let mut editor = editor();
        assert!(!editor.primary_down(at(&editor, "E4")));
        assert_eq!(editor.mode(), &Mode::Idle);
        assert!(!editor.primary_down(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_add_piece_to_empty_square() {
        let mut editor = editor();
        let code = PieceCode::new(PieceColor::Light, PieceKind::Queen);
        let grab = Point::new(32.0, 32.0);
        assert!(editor.begin_add_piece(code, grab, Point::new(600.0, 40.0)));
        assert_eq!(editor.pieces().len(), 33);

        let target = editor.layout().cell_center(sq("D4"));
        editor.pointer_move(target);
        editor.primary_up(target);

        assert_eq!(code_at(&editor, sq("D4")), Some(code));
        assert_eq!(editor.pieces().len(), 33);
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_add_piece_onto_occupied_square_is_discarded() {
        let mut editor = editor();
        let before = placements(&editor);
        let code = PieceCode::new(PieceColor::Dark, PieceKind::Rook);
        editor.begin_add_piece(code, Point::new(32.0, 32.0), Point::new(600.0, 40.0));

        let target = editor.layout().cell_center(sq("A2"));
        editor.pointer_move(target);
        editor.primary_up(target);

        assert_eq!(placements(&editor), before);
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_add_piece_dropped_off_board_is_discarded() {
        let mut editor = EditorModel::new(BoardLayout::default(), ArrowStyle::default());
        let code = PieceCode::new(PieceColor::Dark, PieceKind::Rook);
        editor.begin_add_piece(code, Point::new(32.0, 32.0), Point::new(600.0, 40.0));
        editor.primary_up(Point::new(700.0, 40.0));
        assert!(editor.pieces().is_empty());
    }

    #[test]
    fn test_draw_and_remove_red_arrow() {
        let mut editor = editor();
        assert!(editor.toggle_arrow_color(red()));

        assert!(editor.primary_down(at(&editor, "A1")));
        assert!(matches!(editor.mode(), Mode::DrawingArrow { .. }));
        editor.pointer_move(at(&editor, "D4"));
        editor.pointer_move(at(&editor, "H8"));
        editor.primary_up(at(&editor, "H8"));

        assert_eq!(editor.mode(), &Mode::ArmedForArrow { color: red() });
        assert_eq!(editor.arrows().len(), 1);
        let arrow = editor.arrows().iter().next().unwrap();
        assert_eq!(arrow.start(), sq("A1"));
        assert_eq!(arrow.end(), Some(sq("H8")));
        assert_eq!(arrow.color, red());

        // Pieces are untouched while armed
        assert_eq!(editor.pieces().len(), 32);

        assert!(editor.toggle_arrow_color(red()));
        assert_eq!(editor.mode(), &Mode::Idle);

        let midpoint = editor.layout().cell_center(sq("D4")) + Point::new(32.0, -32.0);
        editor.pointer_move(midpoint);
        assert!(editor.secondary_down(midpoint));
        assert!(editor.arrows().is_empty());
        // The arrow took the click, not the piece-free square beneath it
        assert_eq!(editor.pieces().len(), 32);
    }

    #[test]
    fn test_arrow_end_keeps_last_square_off_board() {
        let mut editor = editor();
        editor.toggle_arrow_color(red());
        editor.primary_down(at(&editor, "C3"));
        editor.pointer_move(at(&editor, "C6"));
        assert!(!editor.pointer_move(Point::new(5000.0, 5000.0)));
        editor.primary_up(Point::new(5000.0, 5000.0));

        let arrow = editor.arrows().iter().next().unwrap();
        assert_eq!(arrow.end(), Some(sq("C6")));
    }

    #[test]
    fn test_zero_length_arrow_is_dropped() {
        let mut editor = editor();
        editor.toggle_arrow_color(red());
        editor.primary_down(at(&editor, "C3"));
        editor.primary_up(at(&editor, "C3"));
        assert!(editor.arrows().is_empty());
        assert_eq!(editor.mode(), &Mode::ArmedForArrow { color: red() });
    }

    #[test]
    fn test_secondary_click_on_empty_square_is_noop() {
        let mut editor = editor();
        let before = placements(&editor);
        assert!(!editor.secondary_down(at(&editor, "E5")));
        assert_eq!(placements(&editor), before);
        assert!(editor.arrows().is_empty());
    }

    #[test]
    fn test_secondary_click_removes_piece() {
        let mut editor = editor();
        assert!(editor.secondary_down(at(&editor, "B8")));
        assert!(editor.pieces().find_at(sq("B8")).is_none());
        assert_eq!(editor.pieces().len(), 31);
    }

    #[test]
    fn test_secondary_click_ignored_while_armed() {
        let mut editor = editor();
        editor.toggle_arrow_color(red());
        assert!(!editor.secondary_down(at(&editor, "B8")));
        assert_eq!(editor.pieces().len(), 32);
    }

    #[test]
    fn test_arrow_colors_are_exclusive() {
        let mut editor = editor();
        let green = ArrowColor::new("green", 0x00ff00);

        editor.toggle_arrow_color(red());
        editor.toggle_arrow_color(green.clone());
        assert_eq!(editor.armed_color(), Some(&green));

        editor.toggle_arrow_color(green);
        assert_eq!(editor.armed_color(), None);
    }

    #[test]
    fn test_toggle_ignored_while_dragging() {
        let mut editor = editor();
        editor.primary_down(at(&editor, "A2"));
        assert!(!editor.toggle_arrow_color(red()));
        assert!(matches!(editor.mode(), Mode::DraggingPiece { .. }));
        let code = PieceCode::new(PieceColor::Light, PieceKind::Pawn);
        assert!(!editor.begin_add_piece(code, Point::default(), Point::default()));
    }

    #[test]
    fn test_add_piece_disarms_arrow_mode() {
        let mut editor = editor();
        editor.toggle_arrow_color(red());
        let code = PieceCode::new(PieceColor::Light, PieceKind::Pawn);
        assert!(editor.begin_add_piece(code, Point::new(32.0, 32.0), Point::new(0.0, 0.0)));
        assert!(editor.armed_color().is_none());
    }

    fn draw_arrow(editor: &mut EditorModel, from: &str, to: &str) {
        let start = at(editor, from);
        let end = at(editor, to);
        editor.toggle_arrow_color(red());
        editor.primary_down(start);
        editor.pointer_move(end);
        editor.primary_up(end);
        editor.toggle_arrow_color(red());
    }

    fn highlighted(editor: &EditorModel) -> usize {
        editor.arrows().iter().filter(|a| a.highlighted).count()
    }

    #[test]
    fn test_armed_press_off_board_is_noop() {
        let mut editor = editor();
        editor.toggle_arrow_color(red());
        let layout = editor.layout().clone();
        let (width, height) = layout.canvas_size();

        // rank label strip, file label strip, past the grid
        for point in [
            Point::new(layout.left_margin() / 2.0, 100.0),
            Point::new(100.0, layout.top_margin() / 2.0),
            Point::new(width + 5.0, height / 2.0),
        ] {
            assert!(!editor.primary_down(point));
            assert_eq!(editor.mode(), &Mode::ArmedForArrow { color: red() });
        }
        assert!(editor.arrows().is_empty());
    }

    #[test]
    fn test_arming_clears_highlights() {
        let mut editor = editor();
        draw_arrow(&mut editor, "A3", "H3");
        assert!(editor.pointer_move(editor.layout().cell_center(sq("D3"))));
        assert_eq!(highlighted(&editor), 1);

        assert!(editor.toggle_arrow_color(red()));
        assert_eq!(highlighted(&editor), 0);
    }

    #[test]
    fn test_controls_ignored_while_drawing() {
        let mut editor = editor();
        let green = ArrowColor::new("green", 0x00ff00);
        editor.toggle_arrow_color(red());
        editor.primary_down(at(&editor, "C3"));

        assert!(!editor.toggle_arrow_color(green));
        let code = PieceCode::new(PieceColor::Light, PieceKind::Pawn);
        assert!(!editor.begin_add_piece(code, Point::default(), Point::default()));
        assert!(matches!(
            editor.mode(),
            Mode::DrawingArrow { color, .. } if *color == red()
        ));
        assert_eq!(editor.pieces().len(), 32);
    }

    #[test]
    fn test_new_piece_follows_pointer() {
        let mut editor = editor();
        let code = PieceCode::new(PieceColor::Dark, PieceKind::Knight);
        let grab = Point::new(32.0, 32.0);
        editor.begin_add_piece(code, grab, Point::new(600.0, 40.0));
        let Mode::PlacingNewPiece { piece, .. } = editor.mode().clone() else {
            panic!("expected placement");
        };
        assert_eq!(
            editor.pieces().get(piece).unwrap().position(),
            Point::new(600.0, 40.0) - grab
        );

        let pointer = Point::new(250.0, 180.0);
        assert!(editor.pointer_move(pointer));
        let placed = editor.pieces().get(piece).unwrap();
        assert_eq!(placed.position(), pointer - grab);
        assert_eq!(placed.placed(), None);
    }

    #[test]
    fn test_drop_refreshes_arrow_highlights() {
        let mut editor = editor();
        draw_arrow(&mut editor, "A2", "H2");
        editor.pointer_move(editor.layout().cell_center(sq("E2")));
        assert_eq!(highlighted(&editor), 1);

        drag(&mut editor, "E2", "E5");

        assert_eq!(
            code_at(&editor, sq("E5")),
            Some(PieceCode::new(PieceColor::Light, PieceKind::Pawn))
        );
        assert_eq!(highlighted(&editor), 0);
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut editor = editor();
        let from = at(&editor, "E7");
        let to = at(&editor, "E5");
        assert!(editor.handle(PointerEvent::Down {
            button: PointerButton::Primary,
            position: from,
        }));
        assert!(editor.handle(PointerEvent::Move { position: to }));
        assert!(editor.handle(PointerEvent::Up {
            button: PointerButton::Primary,
            position: to,
        }));
        assert_eq!(
            code_at(&editor, sq("E5")),
            Some(PieceCode::new(PieceColor::Dark, PieceKind::Pawn))
        );
        assert!(!editor.handle(PointerEvent::Up {
            button: PointerButton::Secondary,
            position: to,
        }));
    }

    #[test]
    fn test_to_local_subtracts_origin() {
        let mut editor = editor();
        assert!(editor.set_board_origin(Point::new(100.0, 50.0)));
        assert!(!editor.set_board_origin(Point::new(100.0, 50.0)));
        assert_eq!(editor.to_local(Point::new(130.0, 70.0)), Point::new(30.0, 20.0));
    }
}
