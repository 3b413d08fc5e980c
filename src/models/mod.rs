pub mod editor;
pub mod export;

pub use editor::{EditorModel, Mode, PointerButton, PointerEvent};
pub use export::{AnimationRecorder, ExportError, ExportModel, Notice, NoticeKind};
