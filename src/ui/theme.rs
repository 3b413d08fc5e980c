//! Theme constants and colors for the editor UI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::ArrowColor;

// Layout constants
pub const PANEL_PADDING: f32 = 20.0;
pub const TOOL_TILE_SIZE: f32 = 44.0;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const TOOLBAR_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const NOTICE_ERROR: u32 = 0xf87171;
pub const NOTICE_INFO: u32 = 0x4ade80;
pub const TILE_HOVER_BG: u32 = 0x3a3a3a;

/// Colors used by the render pass. All values are 0xRRGGBB.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BoardTheme {
    /// Canvas fill behind the board and label strips
    pub background: u32,
    pub light_square: u32,
    pub dark_square: u32,
    /// Fill of arrows under the pointer
    pub highlight: u32,
    /// Colors offered by the arrow toggles, in toolbar order
    pub arrow_palette: Vec<ArrowColor>,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            background: 0x9b9b9b,
            light_square: 0xf0d9b5,
            dark_square: 0xb58863,
            highlight: 0xd2de32,
            arrow_palette: vec![
                ArrowColor::new("red", 0xd64545),
                ArrowColor::new("green", 0x3d9b50),
                ArrowColor::new("blue", 0x3f6fd1),
                ArrowColor::new("orange", 0xe8912d),
            ],
        }
    }
}

impl BoardTheme {
    /// Square color by file and rank index (0-based); A1 is dark
    pub fn square_color(&self, file: u32, rank: u32) -> u32 {
        if (file + rank) % 2 == 0 {
            self.dark_square
        } else {
            self.light_square
        }
    }
}
