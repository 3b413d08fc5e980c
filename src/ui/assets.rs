//! Filesystem-based asset source and the piece image catalog.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use gpui::{AssetSource, SharedString};
use tracing::info;

use crate::domain::PieceCode;

/// Filesystem-based asset source that looks for assets in multiple locations
pub struct FileAssets {
    search_paths: Vec<PathBuf>,
}

impl FileAssets {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        {
            search_paths.push(dir);
        }
        if let Ok(dir) = std::env::current_dir() {
            search_paths.push(dir);
        }
        search_paths.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        Self { search_paths }
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for base in &self.search_paths {
            if let Ok(data) = fs::read(base.join(path)) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut results = Vec::new();
        for base in &self.search_paths {
            if let Ok(entries) = fs::read_dir(base.join(path)) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        results.push(SharedString::from(name.to_string()));
                    }
                }
                break;
            }
        }
        Ok(results)
    }
}

/// SVG sources for every piece glyph.
///
/// Holding one of these proves every image loaded, so nothing that needs the
/// glyphs can be built before loading finished.
#[derive(Clone, Debug)]
pub struct PieceAssets {
    svgs: HashMap<PieceCode, String>,
}

impl PieceAssets {
    /// Load all twelve glyphs, failing on the first one that is missing or unreadable
    pub fn load(source: &impl AssetSource) -> anyhow::Result<Self> {
        let mut svgs = HashMap::with_capacity(PieceCode::ALL.len());
        for code in PieceCode::ALL {
            let path = code.svg_path();
            let bytes = source
                .load(&path)
                .with_context(|| format!("failed to read piece image {path}"))?
                .ok_or_else(|| anyhow!("piece image {path} not found"))?;
            let svg = String::from_utf8(bytes.into_owned())
                .with_context(|| format!("piece image {path} is not UTF-8 SVG"))?;
            svgs.insert(code, svg);
        }
        info!(count = svgs.len(), "piece images loaded");
        Ok(Self { svgs })
    }

    pub fn svg(&self, code: PieceCode) -> &str {
        // every code is present by construction
        self.svgs.get(&code).map(String::as_str).unwrap_or_default()
    }
}
