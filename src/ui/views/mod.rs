mod board_view;
mod toolbar;

pub use board_view::BoardEditorView;
pub use toolbar::render_toolbar;
