use gtk4::prelude::*;
use gtk4 as gtk;

use crate::dashboard::section::Section;
use crate::ui::UiEvent;

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl Sidebar {
    pub fn new(events: glib::Sender<UiEvent>) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Dashboard"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        for section in Section::ALL {
            let row = gtk::ListBoxRow::new();
            row.set_widget_name(section.id());
            let entry = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            entry.set_margin_top(8);
            entry.set_margin_bottom(8);
            entry.set_margin_start(8);
            entry.set_margin_end(8);
            entry.append(&gtk::Image::from_icon_name(section.icon_name()));
            let label = gtk::Label::new(Some(section.title()));
            label.set_halign(gtk::Align::Start);
            entry.append(&label);
            row.set_child(Some(&entry));
            list.append(&row);
        }
        // Only user activation navigates; programmatic selection stays silent.
        list.connect_row_activated(move |_, row| {
            let _ = events.send(UiEvent::Navigate(row.widget_name().to_string()));
        });
        root.append(&list);

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn mark_active(&self, section: Section) {
        let row = self.list.row_at_index(section.index() as i32);
        self.list.select_row(row.as_ref());
    }
}
