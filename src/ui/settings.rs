use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

/// Server URL window, shown on first run and from the header button. The
/// URL is probed best-effort but saved regardless, so the app stays usable
/// against a server that is temporarily down.
pub fn show_settings_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Phonebook Settings")
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

    let title = gtk::Label::new(Some("Connect to a phonebook server"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("Server URL (e.g. http://localhost:3001)"));
    server_entry.set_hexpand(true);
    let existing = crate::app::AppState::load();
    if !existing.server_url.is_empty() {
        server_entry.set_text(&existing.server_url);
    }
    root.append(&server_entry);

    // Status label (small, muted)
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
    let header_title = gtk::Label::new(Some("Phonebook"));
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
            let overlay = overlay.clone();
            let server_url = crate::utils::normalize_url(&server_entry.text());
            if server_url.is_empty() {
                overlay.add_toast(adw::Toast::new("Please enter a server URL."));
                return;
            }
            if url::Url::parse(&server_url).is_err() {
                overlay.add_toast(adw::Toast::new("That does not look like a valid URL."));
                return;
            }

            status.set_label("Connecting…");

            // Best-effort reachability probe against the contact collection
            let url_for_async = server_url.clone();
            let rx: glib::Receiver<Result<(String, String), String>> =
                crate::utils::run_async_to_main(async move {
                    let http = reqwest::Client::builder()
                        .timeout(std::time::Duration::from_secs(5))
                        .build()
                        .map_err(|e| e.to_string())?;
                    let probe =
                        format!("{}/api/persons", url_for_async.trim_end_matches('/'));
                    match http.get(&probe).send().await {
                        Ok(resp) if resp.status().is_success() => {
                            Ok((url_for_async, "Connected".to_string()))
                        }
                        Ok(resp) => Ok((
                            url_for_async,
                            format!("Saved (server answered HTTP {})", resp.status().as_u16()),
                        )),
                        Err(_) => Ok((url_for_async, "Saved (server unreachable)".to_string())),
                    }
                });

            let status_label = status.clone();
            let app2 = app.clone();
            let window2 = window.clone();
            let overlay2 = overlay.clone();
            rx.attach(None, move |res| {
                match res {
                    Ok((server_url, message)) => {
                        log::info!("server check: {server_url} - {message}");
                        status_label.set_label(&message);
                        let mut st = crate::app::AppState::load();
                        st.server_url = server_url;
                        if let Err(e) = st.save() {
                            overlay2
                                .add_toast(adw::Toast::new(&format!("Failed to save settings: {}", e)));
                        }
                        crate::ui::main_window::show_main_window(&app2);
                        window2.close();
                    }
                    Err(err) => {
                        log::warn!("server check failed: {err}");
                        status_label.set_label("Connection failed");
                        overlay2.add_toast(adw::Toast::new(
                            "Could not reach the server. Check the URL.",
                        ));
                    }
                }
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
    // Enter in the entry triggers connect as well
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
