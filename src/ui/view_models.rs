//! Display list types produced by the render pass.
//!
//! These are plain values describing what to paint, in paint order. The board
//! view turns them into GPUI elements and the exporter turns them into SVG.

use crate::domain::{PieceCode, Point};

/// An axis-aligned rectangle in canvas space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        self.origin + Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One paint operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle, colors are 0xRRGGBB
    FillRect { rect: Rect, color: u32 },
    /// Short text centered in `rect`
    Label { rect: Rect, text: String, color: u32 },
    /// Piece glyph scaled into `rect`
    Piece { code: PieceCode, rect: Rect },
    /// Filled closed polygon
    Polygon { points: Vec<Point>, color: u32 },
}

/// A complete picture of the board canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn pieces(&self) -> impl Iterator<Item = (PieceCode, Rect)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Piece { code, rect } => Some((*code, *rect)),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Point], u32)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Polygon { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }
}
