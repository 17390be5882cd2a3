use crate::dashboard::conversation::{ConversationKind, ConversationPanel};
use crate::dashboard::rows::{Row, SearchResults};
use crate::dashboard::section::Section;
use crate::dashboard::upload::UploadState;

/// Rendering side of the dashboard. Each call replaces what the target
/// area showed before.
pub trait View {
    /// Shows `section` and hides every other one.
    fn show_section(&mut self, section: Section);

    /// Shows or hides the list inside a section while a conversation covers it.
    fn set_list_visible(&mut self, section: Section, visible: bool);

    fn render_rows(&mut self, section: Section, rows: &[Row]);

    fn render_search_results(&mut self, section: Section, results: &SearchResults);

    /// Redraws a conversation viewer; an open panel is scrolled to its newest bubble.
    fn render_conversation(&mut self, kind: ConversationKind, panel: &ConversationPanel);

    fn render_upload(&mut self, upload: &UploadState);
}
