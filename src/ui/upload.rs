use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4 as gtk;
use gtk::gio::prelude::FileExt;

use crate::dashboard::upload::{UploadState, ACCEPTED_MIME_TYPES, ACCEPTED_PATTERNS};
use crate::ui::UiEvent;

/// Status line and progress bar at the bottom of the main window.
pub struct UploadBar {
    root: gtk::Box,
    message: gtk::Label,
    progress: gtk::ProgressBar,
}

impl UploadBar {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        root.set_margin_top(4);
        root.set_margin_bottom(4);
        root.set_margin_start(12);
        root.set_margin_end(12);

        let message = gtk::Label::new(None);
        message.add_css_class("dim-label");
        message.set_halign(gtk::Align::Start);
        let progress = gtk::ProgressBar::new();
        progress.set_show_text(true);
        progress.set_hexpand(true);
        progress.set_valign(gtk::Align::Center);
        progress.set_visible(false);

        root.append(&message);
        root.append(&progress);
        root.set_visible(false);
        Self { root, message, progress }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn render(&self, state: &UploadState) {
        self.root.set_visible(!state.message.is_empty() || state.progress_visible);
        self.message.set_label(&state.message);
        self.progress.set_visible(state.progress_visible);
        self.progress.set_fraction(f64::from(state.progress) / 100.0);
    }
}

fn spreadsheet_filter() -> gtk::FileFilter {
    let filter = gtk::FileFilter::new();
    filter.set_name(Some("Spreadsheets (CSV, Excel)"));
    for mime in ACCEPTED_MIME_TYPES {
        filter.add_mime_type(mime);
    }
    for pattern in ACCEPTED_PATTERNS {
        filter.add_pattern(pattern);
    }
    filter
}

/// Opens a single-file picker restricted to spreadsheets and posts the choice.
pub fn pick_file(
    parent: &impl IsA<gtk::Window>,
    holder: &Rc<RefCell<Option<gtk::FileChooserNative>>>,
    events: glib::Sender<UiEvent>,
) {
    let dialog = gtk::FileChooserNative::new(
        Some("Upload Data"),
        Some(parent),
        gtk::FileChooserAction::Open,
        Some("Upload"),
        Some("Cancel"),
    );
    dialog.set_select_multiple(false);
    dialog.add_filter(&spreadsheet_filter());

    let holder_for_response = holder.clone();
    dialog.connect_response(move |dialog, resp| {
        if resp == gtk::ResponseType::Accept {
            if let Some(path) = dialog.file().and_then(|f| f.path()) {
                let _ = events.send(UiEvent::Upload(path));
            }
        }
        holder_for_response.borrow_mut().take();
    });
    dialog.show();
    // The native dialog is dropped as soon as nothing references it.
    holder.borrow_mut().replace(dialog);
}
