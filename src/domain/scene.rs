//! Scene model - the pieces and arrows currently on the board.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::Square;

use crate::domain::board_layout::BoardLayout;
use crate::domain::chess::PieceCode;
use crate::domain::geometry::{ArrowStyle, Point, arrow_hit_corridor, point_in_quad};

/// Unique identifier for a piece in the scene
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceId(u32);

/// Unique identifier for an arrow in the scene
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ArrowId(u32);

/// A piece glyph on (or being dragged over) the board
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    id: PieceId,
    pub code: PieceCode,
    /// Last committed square, `None` while a new piece has not been dropped yet
    placed: Option<Square>,
    /// Live top-left pixel position
    position: Point,
}

impl Piece {
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn placed(&self) -> Option<Square> {
        self.placed
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the live position without committing a square
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Commit the piece to a square and snap it there
    pub fn place(&mut self, sq: Square, layout: &BoardLayout) {
        self.placed = Some(sq);
        self.position = layout.cell_anchor(sq);
    }

    /// Snap back to the committed square, if any
    pub fn snap_back(&mut self, layout: &BoardLayout) {
        if let Some(sq) = self.placed {
            self.position = layout.cell_anchor(sq);
        }
    }
}

/// Named arrow color offered by an arrow toggle control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArrowColor {
    pub name: String,
    /// 0xRRGGBB
    pub rgb: u32,
}

impl ArrowColor {
    pub fn new(name: impl Into<String>, rgb: u32) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }
}

/// A directional annotation from one square to another
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    id: ArrowId,
    start: Square,
    end: Option<Square>,
    pub color: ArrowColor,
    pub highlighted: bool,
}

impl Arrow {
    pub fn id(&self) -> ArrowId {
        self.id
    }

    pub fn start(&self) -> Square {
        self.start
    }

    pub fn end(&self) -> Option<Square> {
        self.end
    }

    pub fn set_end(&mut self, end: Square) -> bool {
        let changed = self.end != Some(end);
        self.end = Some(end);
        changed
    }

    /// The end square, if the arrow has a non-zero length
    pub fn drawable_end(&self) -> Option<Square> {
        self.end.filter(|end| *end != self.start)
    }

    /// Whether `point` falls inside the hit corridor around the shaft
    pub fn contains(&self, point: Point, layout: &BoardLayout, style: &ArrowStyle) -> bool {
        let Some(end) = self.drawable_end() else {
            return false;
        };
        arrow_hit_corridor(
            layout.cell_center(self.start),
            layout.cell_center(end),
            style.hit_half_width(),
        )
        .is_some_and(|corridor| point_in_quad(point, &corridor))
    }
}

/// Pieces in insertion (and drawing) order
#[derive(Clone, Debug, Default)]
pub struct PieceCollection {
    pieces: Vec<Piece>,
    next_id: u32,
}

impl PieceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a piece committed to a square
    pub fn add_placed(&mut self, code: PieceCode, sq: Square, layout: &BoardLayout) -> PieceId {
        self.add(code, Some(sq), layout.cell_anchor(sq))
    }

    /// Add a piece that is not on any square yet
    pub fn add_unplaced(&mut self, code: PieceCode, position: Point) -> PieceId {
        self.add(code, None, position)
    }

    fn add(&mut self, code: PieceCode, placed: Option<Square>, position: Point) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece {
            id,
            code,
            placed,
            position,
        });
        id
    }

    /// First piece committed to `sq`
    pub fn find_at(&self, sq: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.placed == Some(sq))
    }

    /// Remove the first piece committed to `sq`; nothing else is touched when none matches
    pub fn remove_at(&mut self, sq: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.placed == Some(sq))?;
        Some(self.pieces.remove(index))
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Arrows in insertion (and drawing) order
#[derive(Clone, Debug, Default)]
pub struct ArrowCollection {
    arrows: Vec<Arrow>,
    next_id: u32,
}

impl ArrowCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new arrow at `start` with no end yet
    pub fn add(&mut self, start: Square, color: ArrowColor) -> ArrowId {
        let id = ArrowId(self.next_id);
        self.next_id += 1;
        self.arrows.push(Arrow {
            id,
            start,
            end: None,
            color,
            highlighted: false,
        });
        id
    }

    /// Recompute every arrow's highlight flag for the pointer at `point`.
    /// Returns whether any flag changed.
    pub fn update_highlights(
        &mut self,
        point: Point,
        layout: &BoardLayout,
        style: &ArrowStyle,
    ) -> bool {
        let mut changed = false;
        for arrow in &mut self.arrows {
            let hit = arrow.contains(point, layout, style);
            changed |= arrow.highlighted != hit;
            arrow.highlighted = hit;
        }
        changed
    }

    pub fn clear_highlights(&mut self) -> bool {
        let mut changed = false;
        for arrow in &mut self.arrows {
            changed |= arrow.highlighted;
            arrow.highlighted = false;
        }
        changed
    }

    /// Remove the first highlighted arrow. Returns whether one was removed.
    pub fn remove_highlighted(&mut self) -> bool {
        match self.arrows.iter().position(|a| a.highlighted) {
            Some(index) => {
                self.arrows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ArrowId) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ArrowId) -> Option<&mut Arrow> {
        self.arrows.iter_mut().find(|a| a.id == id)
    }

    pub fn remove(&mut self, id: ArrowId) -> Option<Arrow> {
        let index = self.arrows.iter().position(|a| a.id == id)?;
        Some(self.arrows.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter()
    }

    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }
}
