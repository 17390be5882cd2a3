use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4 as gtk;

use crate::dashboard::conversation::ConversationKind;
use crate::dashboard::rows::{Card, OpenTarget, Row, SearchResults, NO_RESULTS};
use crate::dashboard::section::Section;
use crate::ui::conversation_view::ConversationView;
use crate::ui::UiEvent;

const KEYLOG_COLUMNS: [&str; 3] = ["Application", "Time", "Text"];

type Targets = Rc<RefCell<Vec<Option<OpenTarget>>>>;

fn clear(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

fn label(text: &str, css: Option<&str>) -> gtk::Label {
    let lbl = gtk::Label::new(Some(text));
    lbl.set_halign(gtk::Align::Start);
    lbl.set_xalign(0.0);
    lbl.set_ellipsize(gtk::pango::EllipsizeMode::End);
    if let Some(css) = css {
        lbl.add_css_class(css);
    }
    lbl
}

fn table_line(cells: &[&str], css: Option<&str>) -> gtk::Box {
    let line = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    line.set_homogeneous(true);
    line.set_margin_top(6);
    line.set_margin_bottom(6);
    line.set_margin_start(8);
    line.set_margin_end(8);
    for cell in cells {
        line.append(&label(cell, css));
    }
    line
}

fn card_widget(card: &Card) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    root.set_margin_top(8);
    root.set_margin_bottom(8);
    root.set_margin_start(8);
    root.set_margin_end(8);

    // The avatar derives its letter from the text, so feed it the initial only.
    let avatar = adw::Avatar::new(40, Some(&card.initial), true);
    root.append(&avatar);

    let details = gtk::Box::new(gtk::Orientation::Vertical, 2);
    details.set_hexpand(true);
    details.append(&label(&card.title, Some("heading")));
    for line in &card.details {
        details.append(&label(line, Some("dim-label")));
    }
    root.append(&details);

    let trailing = gtk::Box::new(gtk::Orientation::Vertical, 2);
    for line in &card.trailing {
        let lbl = label(line, Some("caption"));
        lbl.set_halign(gtk::Align::End);
        trailing.append(&lbl);
    }
    root.append(&trailing);
    root
}

fn open_on_activate(list: &gtk::ListBox, targets: &Targets, events: &glib::Sender<UiEvent>) {
    let targets = targets.clone();
    let events = events.clone();
    list.connect_row_activated(move |_, row| {
        let target = usize::try_from(row.index())
            .ok()
            .and_then(|i| targets.borrow().get(i).cloned().flatten());
        if let Some(target) = target {
            let _ = events.send(UiEvent::Open(target));
        }
    });
}

/// One section: search entry and results above the collection list, which a
/// conversation viewer can temporarily replace.
pub struct SectionPage {
    root: gtk::Box,
    stack: gtk::Stack,
    rows: gtk::ListBox,
    row_targets: Targets,
    results: gtk::ListBox,
    result_targets: Targets,
    conversation: Option<ConversationView>,
}

impl SectionPage {
    pub fn new(section: Section, events: glib::Sender<UiEvent>) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some(section.title()));
        title.add_css_class("title-2");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some(&format!("Search {}", section.title().to_lowercase())));
        {
            let events = events.clone();
            search.connect_changed(move |entry| {
                let _ = events.send(UiEvent::SearchInput(section, entry.text().to_string()));
            });
        }
        root.append(&search);

        let results = gtk::ListBox::new();
        results.add_css_class("boxed-list");
        results.set_selection_mode(gtk::SelectionMode::None);
        results.set_visible(false);
        let result_targets: Targets = Rc::default();
        open_on_activate(&results, &result_targets, &events);
        root.append(&results);

        let list_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        if section == Section::Keylogs {
            list_box.append(&table_line(&KEYLOG_COLUMNS, Some("heading")));
        }
        let rows = gtk::ListBox::new();
        rows.set_selection_mode(gtk::SelectionMode::None);
        let row_targets: Targets = Rc::default();
        open_on_activate(&rows, &row_targets, &events);
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        scroller.set_child(Some(&rows));
        list_box.append(&scroller);

        let stack = gtk::Stack::new();
        stack.set_vexpand(true);
        stack.add_named(&list_box, Some("list"));

        let conversation = match section {
            Section::Chats => Some(ConversationKind::Chat),
            Section::Sms => Some(ConversationKind::Sms),
            _ => None,
        }
        .map(|kind| ConversationView::new(kind, events.clone()));
        if let Some(view) = &conversation {
            stack.add_named(&view.widget(), Some("conversation"));
        }
        stack.set_visible_child_name("list");
        root.append(&stack);

        Self {
            root,
            stack,
            rows,
            row_targets,
            results,
            result_targets,
            conversation,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn conversation(&self) -> Option<&ConversationView> {
        self.conversation.as_ref()
    }

    pub fn set_list_visible(&self, visible: bool) {
        if visible || self.conversation.is_none() {
            self.stack.set_visible_child_name("list");
        } else {
            self.stack.set_visible_child_name("conversation");
        }
    }

    pub fn set_rows(&self, rows: &[Row]) {
        clear(&self.rows);
        let mut targets = self.row_targets.borrow_mut();
        targets.clear();
        for row in rows {
            let item = gtk::ListBoxRow::new();
            match row {
                Row::Card(card) => item.set_child(Some(&card_widget(card))),
                Row::Table(cells) => {
                    let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
                    item.set_child(Some(&table_line(&cells, None)));
                }
            }
            item.set_activatable(row.opens().is_some());
            targets.push(row.opens().cloned());
            self.rows.append(&item);
        }
    }

    pub fn set_results(&self, results: &SearchResults) {
        clear(&self.results);
        let mut targets = self.result_targets.borrow_mut();
        targets.clear();
        match results {
            SearchResults::Cleared => self.results.set_visible(false),
            SearchResults::NoResults => {
                let item = gtk::ListBoxRow::new();
                item.set_activatable(false);
                let lbl = label(NO_RESULTS, Some("dim-label"));
                lbl.set_margin_top(6);
                lbl.set_margin_bottom(6);
                lbl.set_margin_start(8);
                item.set_child(Some(&lbl));
                targets.push(None);
                self.results.append(&item);
                self.results.set_visible(true);
            }
            SearchResults::Lines(lines) => {
                for line in lines {
                    let item = gtk::ListBoxRow::new();
                    let lbl = label(&line.text, None);
                    lbl.set_margin_top(6);
                    lbl.set_margin_bottom(6);
                    lbl.set_margin_start(8);
                    item.set_child(Some(&lbl));
                    item.set_activatable(line.opens.is_some());
                    targets.push(line.opens.clone());
                    self.results.append(&item);
                }
                self.results.set_visible(true);
            }
        }
    }
}
