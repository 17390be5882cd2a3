use gtk4::prelude::*;
use gtk4 as gtk;

use crate::dashboard::conversation::{ConversationKind, ConversationPanel, Direction, PanelState};
use crate::ui::UiEvent;

/// Message thread of one contact, shown in place of a section's list.
pub struct ConversationView {
    root: gtk::Box,
    title: gtk::Label,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
}

impl ConversationView {
    pub fn new(kind: ConversationKind, events: glib::Sender<UiEvent>) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = gtk::Label::new(None);
        title.add_css_class("title-3");
        title.set_halign(gtk::Align::Start);
        title.set_hexpand(true);
        let close_btn = gtk::Button::from_icon_name("window-close-symbolic");
        close_btn.set_tooltip_text(Some("Close"));
        close_btn.add_css_class("flat");
        close_btn.connect_clicked(move |_| {
            let _ = events.send(UiEvent::Close(kind));
        });
        header.append(&title);
        header.append(&close_btn);
        root.append(&header);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        Self { root, title, scroller, messages_box }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn render(&self, panel: &ConversationPanel) {
        self.root.set_visible(panel.is_visible());
        self.title.set_label(&panel.title);
        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }

        if panel.state == PanelState::Opening {
            let spinner = gtk::Spinner::new();
            spinner.start();
            self.messages_box.append(&spinner);
            return;
        }
        if let Some(error) = &panel.error {
            let lbl = gtk::Label::new(Some(error));
            lbl.add_css_class("error");
            lbl.set_halign(gtk::Align::Center);
            self.messages_box.append(&lbl);
            return;
        }

        for bubble in &panel.bubbles {
            let item = gtk::Box::new(gtk::Orientation::Vertical, 2);
            item.add_css_class("card");
            item.set_margin_start(4);
            item.set_margin_end(4);
            let text = gtk::Label::new(Some(&bubble.text));
            text.set_wrap(true);
            text.set_xalign(0.0);
            text.set_margin_top(6);
            text.set_margin_start(8);
            text.set_margin_end(8);
            let time = gtk::Label::new(Some(&bubble.time));
            time.add_css_class("caption");
            time.add_css_class("dim-label");
            time.set_margin_bottom(6);
            time.set_margin_start(8);
            time.set_margin_end(8);
            match bubble.direction {
                Direction::Outgoing => {
                    item.set_halign(gtk::Align::End);
                    item.add_css_class("accent");
                    time.set_halign(gtk::Align::End);
                }
                Direction::Incoming => {
                    item.set_halign(gtk::Align::Start);
                    time.set_halign(gtk::Align::Start);
                }
            }
            item.append(&text);
            item.append(&time);
            self.messages_box.append(&item);
        }

        // Newest message last; scroll once the new children are measured.
        let scroller = self.scroller.clone();
        gtk::glib::idle_add_local_once(move || {
            let adj = scroller.vadjustment();
            adj.set_value(adj.upper());
        });
    }
}
