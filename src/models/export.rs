//! Export model - SVG encoding of rendered frames, file saving and animation capture.
//!
//! Frames are encoded as standalone SVG documents. Piece glyphs are embedded
//! once per document as `<symbol>` definitions and placed with `<use>`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use gpui::{Image, ImageFormat};
use tracing::{info, warn};

use crate::domain::PieceCode;
use crate::ui::assets::PieceAssets;
use crate::ui::view_models::{DrawCommand, Frame};

/// Fallback coordinate system for glyphs without a `viewBox`
const DEFAULT_VIEW_BOX: &str = "0 0 45 45";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no frames captured for the animation")]
    EmptyAnimation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Outcome of the last export action, shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Encode a single frame as an SVG document
pub fn frame_to_svg(frame: &Frame, assets: &PieceAssets) -> String {
    let mut out = String::new();
    write_header(&mut out, frame);
    write_defs(&mut out, std::slice::from_ref(frame), assets);
    write_commands(&mut out, frame);
    out.push_str("</svg>\n");
    out
}

fn write_header(out: &mut String, frame: &Frame) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height,
    );
}

/// One `<symbol>` per distinct piece code used by any of the frames
fn write_defs(out: &mut String, frames: &[Frame], assets: &PieceAssets) {
    let codes: BTreeSet<PieceCode> = frames
        .iter()
        .flat_map(|frame| frame.pieces().map(|(code, _)| code))
        .collect();
    if codes.is_empty() {
        return;
    }

    out.push_str("<defs>\n");
    for code in codes {
        let (view_box, body) = split_svg(assets.svg(code));
        let _ = writeln!(
            out,
            r#"<symbol id="piece-{code}" viewBox="{view_box}">{body}</symbol>"#
        );
    }
    out.push_str("</defs>\n");
}

fn write_commands(out: &mut String, frame: &Frame) {
    for command in &frame.commands {
        match command {
            DrawCommand::FillRect { rect, color } => {
                let _ = writeln!(
                    out,
                    r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#{color:06x}"/>"##,
                    rect.origin.x, rect.origin.y, rect.width, rect.height,
                );
            }
            DrawCommand::Label { rect, text, color } => {
                let center = rect.center();
                let size = rect.width.min(rect.height) * 0.8;
                let _ = writeln!(
                    out,
                    r##"<text x="{}" y="{}" font-size="{size}" font-family="sans-serif" text-anchor="middle" dominant-baseline="central" fill="#{color:06x}">{}</text>"##,
                    center.x,
                    center.y,
                    escape_text(text),
                );
            }
            DrawCommand::Piece { code, rect } => {
                let _ = writeln!(
                    out,
                    r##"<use href="#piece-{code}" xlink:href="#piece-{code}" x="{}" y="{}" width="{}" height="{}"/>"##,
                    rect.origin.x, rect.origin.y, rect.width, rect.height,
                );
            }
            DrawCommand::Polygon { points, color } => {
                let mut coords = String::new();
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        coords.push(' ');
                    }
                    let _ = write!(coords, "{:.2},{:.2}", p.x, p.y);
                }
                let _ = writeln!(
                    out,
                    r##"<polygon points="{coords}" fill="#{color:06x}"/>"##
                );
            }
        }
    }
}

/// Pull the `viewBox` and inner markup out of a standalone SVG document
fn split_svg(source: &str) -> (&str, &str) {
    let Some(open_start) = source.find("<svg") else {
        return (DEFAULT_VIEW_BOX, "");
    };
    let Some(open_len) = source[open_start..].find('>') else {
        return (DEFAULT_VIEW_BOX, "");
    };
    let open_tag = &source[open_start..open_start + open_len];
    let view_box = attribute(open_tag, "viewBox").unwrap_or(DEFAULT_VIEW_BOX);

    // self-closing root has no body
    if open_tag.ends_with('/') {
        return (view_box, "");
    }
    let body_start = open_start + open_len + 1;
    let body_end = source.rfind("</svg>").unwrap_or(source.len()).max(body_start);
    (view_box, source[body_start..body_end].trim())
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Frames captured for an animated export
#[derive(Clone, Debug, Default)]
pub struct AnimationRecorder {
    frames: Vec<Frame>,
}

impl AnimationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Encode the captured frames as a looping animated SVG, each frame shown
    /// for `frame_delay_ms`.
    pub fn finish(&self, assets: &PieceAssets, frame_delay_ms: u32) -> Result<String, ExportError> {
        let first = self.frames.first().ok_or(ExportError::EmptyAnimation)?;
        let count = self.frames.len();
        let total_ms = u64::from(frame_delay_ms.max(1)) * count as u64;

        let mut out = String::new();
        write_header(&mut out, first);
        write_defs(&mut out, &self.frames, assets);
        for (index, frame) in self.frames.iter().enumerate() {
            let display = if index == 0 { "inline" } else { "none" };
            let _ = writeln!(out, r#"<g display="{display}">"#);
            if count > 1 {
                let start = index as f32 / count as f32;
                let end = (index + 1) as f32 / count as f32;
                let (values, key_times) = if index == 0 {
                    ("inline;none".to_string(), format!("0;{end}"))
                } else {
                    ("none;inline;none".to_string(), format!("0;{start};{end}"))
                };
                let _ = writeln!(
                    out,
                    r#"<animate attributeName="display" values="{values}" keyTimes="{key_times}" dur="{total_ms}ms" calcMode="discrete" repeatCount="indefinite"/>"#
                );
            }
            write_commands(&mut out, frame);
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        Ok(out)
    }
}

/// Export state: glyph sources, output directory, pending animation and last outcome
pub struct ExportModel {
    assets: PieceAssets,
    export_dir: PathBuf,
    frame_delay_ms: u32,
    recorder: AnimationRecorder,
    notice: Option<Notice>,
}

impl ExportModel {
    pub fn new(assets: PieceAssets, export_dir: PathBuf, frame_delay_ms: u32) -> Self {
        Self {
            assets,
            export_dir,
            frame_delay_ms,
            recorder: AnimationRecorder::new(),
            notice: None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn captured_frames(&self) -> usize {
        self.recorder.len()
    }

    /// The frame as an SVG image, ready to be put on the clipboard
    pub fn clipboard_image(&mut self, frame: &Frame) -> Image {
        let svg = frame_to_svg(frame, &self.assets);
        info!(bytes = svg.len(), "frame copied to clipboard");
        self.notice = Some(Notice::info("Copied board to clipboard"));
        Image::from_bytes(ImageFormat::Svg, svg.into_bytes())
    }

    /// Write the frame to the next free `board-NNN.svg`
    pub fn save_frame(&mut self, frame: &Frame) -> Result<PathBuf, ExportError> {
        let svg = frame_to_svg(frame, &self.assets);
        let result = write_next(&self.export_dir, "board", &svg);
        self.report(&result, "Saved");
        result
    }

    pub fn capture_frame(&mut self, frame: Frame) {
        self.recorder.push(frame);
        let count = self.recorder.len();
        info!(frames = count, "animation frame captured");
        self.notice = Some(Notice::info(format!("Captured frame {count}")));
    }

    /// Write the captured frames to the next free `animation-NNN.svg` and start over
    pub fn finish_animation(&mut self) -> Result<PathBuf, ExportError> {
        let result = self
            .recorder
            .finish(&self.assets, self.frame_delay_ms)
            .and_then(|svg| write_next(&self.export_dir, "animation", &svg));
        if result.is_ok() {
            self.recorder.clear();
        }
        self.report(&result, "Saved animation");
        result
    }

    fn report(&mut self, result: &Result<PathBuf, ExportError>, verb: &str) {
        self.notice = Some(match result {
            Ok(path) => {
                info!(path = %path.display(), "export written");
                Notice::info(format!("{verb} {}", path.display()))
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                Notice::error(format!("Export failed: {err}"))
            }
        });
    }
}

/// Write `contents` to the first `<stem>-NNN.svg` in `dir` that does not exist yet
fn write_next(dir: &Path, stem: &str, contents: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut n = 0u32;
    loop {
        n += 1;
        let path = dir.join(format!("{stem}-{n:03}.svg"));
        // create_new fails on names that exist, even ones created a moment ago
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ExportError::Write { path, source }),
        };
        return match file.write_all(contents.as_bytes()) {
            Ok(()) => Ok(path),
            Err(source) => Err(ExportError::Write { path, source }),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gpui::{AssetSource, SharedString};

    use crate::domain::{ArrowColor, ArrowStyle, BoardLayout};
    use crate::models::EditorModel;
    use crate::ui::display::render_frame;
    use crate::ui::theme::BoardTheme;

    struct StubGlyphs;

    impl AssetSource for StubGlyphs {
        fn load(&self, _path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
            let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 90 90"><circle cx="45" cy="45" r="30"/></svg>"#;
            Ok(Some(Cow::Borrowed(&svg[..])))
        }

        fn list(&self, _path: &str) -> gpui::Result<Vec<SharedString>> {
            Ok(Vec::new())
        }
    }

    fn assets() -> PieceAssets {
        PieceAssets::load(&StubGlyphs).unwrap()
    }

    fn frame() -> Frame {
        let editor =
            EditorModel::with_standard_setup(BoardLayout::default(), ArrowStyle::default());
        render_frame(&editor, &BoardTheme::default())
    }

    fn scratch_dir() -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        std::env::temp_dir().join(format!(
            "board-sketch-test-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ))
    }

    #[test]
    fn test_split_svg() {
        let (view_box, body) = split_svg(
            r#"<?xml version="1.0"?><svg viewBox="0 0 10 10" width="10"><rect/></svg>"#,
        );
        assert_eq!(view_box, "0 0 10 10");
        assert_eq!(body, "<rect/>");

        assert_eq!(split_svg("<svg/>"), (DEFAULT_VIEW_BOX, ""));
        assert_eq!(split_svg("not svg"), (DEFAULT_VIEW_BOX, ""));
    }

    #[test]
    fn test_frame_svg_embeds_each_glyph_once() {
        let svg = frame_to_svg(&frame(), &assets());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<symbol").count(), 12);
        assert_eq!(svg.matches("<use ").count(), 32);
        assert_eq!(svg.matches(r#"viewBox="0 0 90 90""#).count(), 12);
        assert!(svg.contains(">E</text>"));
        assert!(svg.contains(">8</text>"));
    }

    #[test]
    fn test_glyph_symbols_in_code_order() {
        let svg = frame_to_svg(&frame(), &assets());
        let first_dark = svg.find(r#"id="piece-DB""#).unwrap();
        let last_dark = svg.find(r#"id="piece-DR""#).unwrap();
        let first_light = svg.find(r#"id="piece-LB""#).unwrap();
        assert!(first_dark < last_dark && last_dark < first_light);
    }

    #[test]
    fn test_clipboard_gets_svg_image() {
        let mut export = ExportModel::new(assets(), scratch_dir(), 500);
        let image = export.clipboard_image(&frame());
        assert_eq!(image.format, ImageFormat::Svg);
        let text = std::str::from_utf8(&image.bytes).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("<symbol"));
        assert_eq!(export.notice().map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_save_frame_never_overwrites_existing_file() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("board-001.svg"), "keep me").unwrap();
        let mut export = ExportModel::new(assets(), dir.clone(), 500);

        let path = export.save_frame(&frame()).unwrap();
        assert_eq!(path, dir.join("board-002.svg"));
        assert_eq!(fs::read_to_string(dir.join("board-001.svg")).unwrap(), "keep me");
        assert!(fs::read_to_string(&path).unwrap().starts_with("<svg"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_arrows_exported_as_polygons() {
        let mut editor =
            EditorModel::with_standard_setup(BoardLayout::default(), ArrowStyle::default());
        let layout = editor.layout().clone();
        editor.toggle_arrow_color(ArrowColor::new("red", 0xff0000));
        editor.primary_down(layout.cell_center(shakmaty::Square::E2));
        editor.pointer_move(layout.cell_center(shakmaty::Square::E4));
        editor.primary_up(layout.cell_center(shakmaty::Square::E4));

        let svg = frame_to_svg(&render_frame(&editor, &BoardTheme::default()), &assets());
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn test_empty_animation_is_an_error() {
        let recorder = AnimationRecorder::new();
        assert!(matches!(
            recorder.finish(&assets(), 500),
            Err(ExportError::EmptyAnimation)
        ));
    }

    #[test]
    fn test_animation_frames_take_turns() {
        let mut recorder = AnimationRecorder::new();
        recorder.push(frame());
        recorder.push(frame());
        let svg = recorder.finish(&assets(), 400).unwrap();

        assert_eq!(svg.matches("<animate ").count(), 2);
        assert_eq!(svg.matches(r#"dur="800ms""#).count(), 2);
        assert!(svg.contains(r#"keyTimes="0;0.5""#));
        assert!(svg.contains(r#"keyTimes="0;0.5;1""#));
        // glyphs are shared between frames
        assert_eq!(svg.matches("<symbol").count(), 12);
    }

    #[test]
    fn test_single_frame_animation_is_static() {
        let mut recorder = AnimationRecorder::new();
        recorder.push(frame());
        let svg = recorder.finish(&assets(), 400).unwrap();
        assert!(!svg.contains("<animate"));
    }

    #[test]
    fn test_save_frame_picks_next_free_name() {
        let dir = scratch_dir();
        let mut export = ExportModel::new(assets(), dir.clone(), 500);

        let first = export.save_frame(&frame()).unwrap();
        let second = export.save_frame(&frame()).unwrap();
        assert_eq!(first, dir.join("board-001.svg"));
        assert_eq!(second, dir.join("board-002.svg"));
        assert_eq!(export.notice().map(|n| n.kind), Some(NoticeKind::Info));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_finish_animation_resets_recorder() {
        let dir = scratch_dir();
        let mut export = ExportModel::new(assets(), dir.clone(), 500);

        assert!(export.finish_animation().is_err());
        assert_eq!(export.notice().map(|n| n.kind), Some(NoticeKind::Error));

        export.capture_frame(frame());
        export.capture_frame(frame());
        assert_eq!(export.captured_frames(), 2);
        let path = export.finish_animation().unwrap();
        assert_eq!(path, dir.join("animation-001.svg"));
        assert_eq!(export.captured_frames(), 0);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_unwritable_export_dir_reports_error() {
        let blocker = scratch_dir();
        fs::write(&blocker, "not a directory").unwrap();
        let mut export = ExportModel::new(assets(), blocker.join("nested"), 500);

        let err = export.save_frame(&frame()).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
        let notice = export.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.starts_with("Export failed"));

        let _ = fs::remove_file(blocker);
    }
}
