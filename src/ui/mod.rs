use std::path::PathBuf;

use crate::dashboard::conversation::ConversationKind;
use crate::dashboard::rows::OpenTarget;
use crate::dashboard::section::Section;

pub mod connect;
pub mod conversation_view;
pub mod gtk_view;
pub mod main_window;
pub mod section_view;
pub mod sidebar;
pub mod upload;

/// User actions posted by widgets and handled by the main window on the main loop.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Carries the section id of the activated sidebar entry.
    Navigate(String),
    SearchInput(Section, String),
    Open(OpenTarget),
    Close(ConversationKind),
    Upload(PathBuf),
}
