//! Editor configuration, loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{ArrowStyle, BoardLayout};
use crate::ui::theme::BoardTheme;

/// Everything the editor reads once at startup. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Side length of one board square in pixels
    pub cell_size: f32,
    /// Width of the rank label strip left of the board
    pub rank_label_width: f32,
    /// Height of the file label strip above the board
    pub file_label_height: f32,
    pub arrow: ArrowStyle,
    pub theme: BoardTheme,
    /// Directory exported pictures and animations are written to
    pub export_dir: PathBuf,
    /// How long each captured frame is shown in an exported animation
    pub animation_frame_ms: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: 64.0,
            rank_label_width: 20.0,
            file_label_height: 10.0,
            arrow: ArrowStyle::default(),
            theme: BoardTheme::default(),
            export_dir: PathBuf::from("exports"),
            animation_frame_ms: 500,
        }
    }
}

impl EditorConfig {
    /// Read the config file at `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.cell_size.is_finite() && self.cell_size > 0.0,
            "cell_size must be positive, got {}",
            self.cell_size
        );
        anyhow::ensure!(
            self.rank_label_width >= 0.0 && self.file_label_height >= 0.0,
            "label strips cannot have negative size"
        );
        anyhow::ensure!(
            !self.theme.arrow_palette.is_empty(),
            "theme.arrow_palette needs at least one color"
        );
        Ok(())
    }

    pub fn board_layout(&self) -> BoardLayout {
        BoardLayout::new(self.cell_size, self.rank_label_width, self.file_label_height)
    }

    /// JSON schema describing the config file
    pub fn schema_json() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(EditorConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
