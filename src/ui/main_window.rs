use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use adw::prelude::*;
use adw::Application;

use crate::api::backend::Backend;
use crate::api::client::ApiClient;
use crate::app::AppState;
use crate::dashboard::controller::{Dashboard, LoadTicket, OpenTicket, SearchRequest, SearchTicket};
use crate::dashboard::section::Section;
use crate::dashboard::upload::UploadFile;
use crate::ui::gtk_view::GtkView;
use crate::ui::section_view::SectionPage;
use crate::ui::sidebar::Sidebar;
use crate::ui::upload::UploadBar;
use crate::ui::UiEvent;

type SharedDashboard = Rc<RefCell<Dashboard<GtkView>>>;

pub fn show_main_window(app: &Application, state: AppState) {
    let backend: Arc<dyn Backend> = match ApiClient::new(&state.base_url) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("unusable server address {:?}: {e}", state.base_url);
            crate::ui::connect::show_connect_window(app, state);
            return;
        }
    };

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Monitor Dashboard")
        .default_width(1024)
        .default_height(680)
        .build();

    let overlay = adw::ToastOverlay::new();
    let (events, events_rx) = crate::utils::glib_channel::<UiEvent>();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Rc::new(Sidebar::new(events.clone()));
    split.set_flap(Some(&sidebar.widget()));

    let stack = gtk4::Stack::new();
    stack.set_transition_type(gtk4::StackTransitionType::Crossfade);
    let pages: Vec<SectionPage> = Section::ALL
        .iter()
        .map(|section| {
            let page = SectionPage::new(*section, events.clone());
            stack.add_named(&page.widget(), Some(section.id()));
            page
        })
        .collect();
    split.set_content(Some(&stack));

    let upload_bar = UploadBar::new();
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    split.set_vexpand(true);
    content.append(&split);
    content.append(&upload_bar.widget());
    overlay.set_child(Some(&content));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Monitor Dashboard"));
    header.set_title_widget(Some(&title));

    let upload_btn = gtk4::Button::from_icon_name("document-send-symbolic");
    upload_btn.set_tooltip_text(Some("Upload spreadsheet"));
    header.pack_end(&upload_btn);
    let server_btn = gtk4::Button::from_icon_name("network-server-symbolic");
    server_btn.set_tooltip_text(Some(&format!("Server: {}", state.base_url)));
    header.pack_start(&server_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let view = GtkView {
        stack,
        sidebar,
        pages,
        upload: upload_bar,
    };
    let (dashboard, search_rx) = Dashboard::new(
        backend,
        view,
        state.debounce(),
        crate::utils::RUNTIME.handle().clone(),
    );
    let dashboard: SharedDashboard = Rc::new(RefCell::new(dashboard));

    {
        let dashboard = dashboard.clone();
        events_rx.attach(None, move |event| {
            dispatch(&dashboard, event);
            glib::ControlFlow::Continue
        });
    }
    {
        let dashboard = dashboard.clone();
        crate::utils::forward_to_main(search_rx).attach(None, move |request| {
            begin_search(&dashboard, request);
            glib::ControlFlow::Continue
        });
    }

    {
        let window_for_picker = window.clone();
        let holder = Rc::new(RefCell::new(None));
        let events = events.clone();
        upload_btn.connect_clicked(move |_| {
            crate::ui::upload::pick_file(&window_for_picker, &holder, events.clone());
        });
    }
    {
        let app = app.clone();
        let window = window.clone();
        server_btn.connect_clicked(move |_| {
            crate::ui::connect::show_connect_window(&app, AppState::load());
            window.close();
        });
    }

    window.present();

    let ticket = dashboard.borrow_mut().start();
    spawn_load(&dashboard, ticket);
}

fn dispatch(dashboard: &SharedDashboard, event: UiEvent) {
    log::debug!("ui event {event:?}");
    match event {
        UiEvent::Navigate(id) => {
            let ticket = dashboard.borrow_mut().navigate(&id);
            if let Some(ticket) = ticket {
                spawn_load(dashboard, ticket);
            }
        }
        UiEvent::SearchInput(section, term) => dashboard.borrow_mut().search_input(section, &term),
        UiEvent::Open(target) => {
            let ticket = dashboard.borrow_mut().begin_open(target);
            spawn_open(dashboard, ticket);
        }
        UiEvent::Close(kind) => dashboard.borrow_mut().close(kind),
        UiEvent::Upload(path) => {
            let file = dashboard.borrow_mut().begin_upload(&path);
            if let Some(file) = file {
                spawn_upload(dashboard, file);
            }
        }
    }
}

fn begin_search(dashboard: &SharedDashboard, request: SearchRequest) {
    let ticket = dashboard.borrow_mut().begin_search(request);
    if let Some(ticket) = ticket {
        spawn_search(dashboard, ticket);
    }
}

fn spawn_load(dashboard: &SharedDashboard, ticket: LoadTicket) {
    let backend = dashboard.borrow().backend();
    let rx = crate::utils::run_async_to_main(async move { backend.collection(ticket.section).await });
    let dashboard = dashboard.clone();
    rx.attach(None, move |res| {
        dashboard.borrow_mut().finish_load(ticket, res);
        glib::ControlFlow::Continue
    });
}

fn spawn_search(dashboard: &SharedDashboard, ticket: SearchTicket) {
    let backend = dashboard.borrow().backend();
    let section = ticket.section;
    let term = ticket.term.clone();
    let rx = crate::utils::run_async_to_main(async move { backend.search(section, &term).await });
    let dashboard = dashboard.clone();
    let mut ticket = Some(ticket);
    rx.attach(None, move |res| {
        if let Some(ticket) = ticket.take() {
            dashboard.borrow_mut().finish_search(ticket, res);
        }
        glib::ControlFlow::Continue
    });
}

fn spawn_open(dashboard: &SharedDashboard, ticket: OpenTicket) {
    let backend = dashboard.borrow().backend();
    let kind = ticket.kind;
    let name = ticket.name.clone();
    let rx = crate::utils::run_async_to_main(async move { backend.thread(kind, &name).await });
    let dashboard = dashboard.clone();
    let mut ticket = Some(ticket);
    rx.attach(None, move |res| {
        if let Some(ticket) = ticket.take() {
            dashboard.borrow_mut().finish_open(ticket, res);
        }
        glib::ControlFlow::Continue
    });
}

fn spawn_upload(dashboard: &SharedDashboard, file: UploadFile) {
    let backend = dashboard.borrow().backend();
    let (progress_tx, progress_rx) = tokio::sync::mpsc::unbounded_channel();
    {
        let dashboard = dashboard.clone();
        crate::utils::forward_to_main(progress_rx).attach(None, move |percent| {
            dashboard.borrow_mut().upload_progress(percent);
            glib::ControlFlow::Continue
        });
    }
    let rx = crate::utils::run_async_to_main(async move { backend.upload(file, progress_tx).await });
    let dashboard = dashboard.clone();
    rx.attach(None, move |res| {
        let reload = dashboard.borrow_mut().finish_upload(res);
        if let Some(ticket) = reload {
            spawn_load(&dashboard, ticket);
        }
        glib::ControlFlow::Continue
    });
}
