use std::rc::Rc;

use gtk4 as gtk;

use crate::dashboard::conversation::{ConversationKind, ConversationPanel};
use crate::dashboard::rows::{Row, SearchResults};
use crate::dashboard::section::Section;
use crate::dashboard::upload::UploadState;
use crate::dashboard::view::View;
use crate::ui::section_view::SectionPage;
use crate::ui::sidebar::Sidebar;
use crate::ui::upload::UploadBar;

/// The widget tree the dashboard renders into.
pub struct GtkView {
    pub stack: gtk::Stack,
    pub sidebar: Rc<Sidebar>,
    pub pages: Vec<SectionPage>,
    pub upload: UploadBar,
}

impl GtkView {
    fn page(&self, section: Section) -> &SectionPage {
        &self.pages[section.index()]
    }
}

impl View for GtkView {
    fn show_section(&mut self, section: Section) {
        self.stack.set_visible_child_name(section.id());
        self.sidebar.mark_active(section);
    }

    fn set_list_visible(&mut self, section: Section, visible: bool) {
        self.page(section).set_list_visible(visible);
    }

    fn render_rows(&mut self, section: Section, rows: &[Row]) {
        self.page(section).set_rows(rows);
    }

    fn render_search_results(&mut self, section: Section, results: &SearchResults) {
        self.page(section).set_results(results);
    }

    fn render_conversation(&mut self, kind: ConversationKind, panel: &ConversationPanel) {
        if let Some(view) = self.page(kind.section()).conversation() {
            view.render(panel);
        }
    }

    fn render_upload(&mut self, upload: &UploadState) {
        self.upload.render(upload);
    }
}
