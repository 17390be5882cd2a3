use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

use crate::api::client::ApiClient;
use crate::app::AppState;

/// Asks for the dashboard server address, checks it answers, and saves it.
pub fn show_connect_window(app: &Application, state: AppState) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Connect to Dashboard")
        .default_width(420)
        .default_height(220)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Dashboard server"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("Server URL (e.g. http://192.168.1.20:5000)"));
    server_entry.set_hexpand(true);
    server_entry.set_text(&state.base_url);
    root.append(&server_entry);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Monitor Dashboard"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        move || {
            let url = crate::utils::normalize_url(&server_entry.text());
            if url.is_empty() {
                overlay.add_toast(adw::Toast::new("Please enter the server URL."));
                return;
            }
            let http = match reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
            {
                Ok(http) => http,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&format!("HTTP client error: {e}")));
                    return;
                }
            };
            let client = match ApiClient::with_http(http, &url) {
                Ok(client) => client,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&format!("Invalid server URL: {e}")));
                    return;
                }
            };

            status.set_label("Connecting…");
            let (tx, rx) = crate::utils::glib_channel::<(String, String)>();
            crate::utils::spawn_async(async move {
                let message = match client.probe().await {
                    Ok(code) if (200..300).contains(&code) => "Connected".to_string(),
                    // The address is kept either way; the dashboard shows empty sections until it answers.
                    Ok(code) => format!("Saved (server answered HTTP {code})"),
                    Err(e) => {
                        log::warn!("server check failed: {e}");
                        "Saved (server unreachable)".to_string()
                    }
                };
                let _ = tx.send((url, message));
            });

            let status_label = status.clone();
            let app2 = app.clone();
            let window2 = window.clone();
            let overlay2 = overlay.clone();
            let mut settings = state.clone();
            rx.attach(None, move |(base_url, message)| {
                log::info!("server check: {base_url} - {message}");
                status_label.set_label(&message);
                settings.base_url = base_url;
                if let Err(e) = settings.save() {
                    overlay2.add_toast(adw::Toast::new(&format!("Failed to save settings: {}", e)));
                }
                crate::ui::main_window::show_main_window(&app2, settings.clone());
                window2.close();
                glib::ControlFlow::Continue
            });
        }
    };

    use std::rc::Rc;
    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
