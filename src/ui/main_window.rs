use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::state::Phonebook;
use crate::ui::contact_list::ContactList;
use crate::ui::notification::Notifications;

pub fn show_main_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Phonebook")
        .default_width(520)
        .default_height(640)
        .build();

    let state = Rc::new(RefCell::new(Phonebook::new()));
    let notifications = Rc::new(Notifications::new());
    let contact_list = Rc::new(ContactList::new());

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Phonebook"));
    header.set_title_widget(Some(&title));

    let settings_btn = gtk::Button::with_label("Server");
    header.pack_end(&settings_btn);
    container.append(&header);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(16);
    content.set_margin_bottom(16);
    content.set_margin_start(16);
    content.set_margin_end(16);

    content.append(&notifications.widget());

    let filter_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let filter_label = gtk::Label::new(Some("filter shown with"));
    let filter_entry = gtk::Entry::new();
    filter_entry.set_hexpand(true);
    filter_row.append(&filter_label);
    filter_row.append(&filter_entry);
    content.append(&filter_row);

    let form_title = gtk::Label::new(Some("add a new"));
    form_title.add_css_class("heading");
    form_title.set_halign(gtk::Align::Start);
    content.append(&form_title);

    let name_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let name_label = gtk::Label::new(Some("name:"));
    let name_entry = gtk::Entry::new();
    name_entry.set_hexpand(true);
    name_row.append(&name_label);
    name_row.append(&name_entry);
    content.append(&name_row);

    let number_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let number_label = gtk::Label::new(Some("number:"));
    let number_entry = gtk::Entry::new();
    number_entry.set_hexpand(true);
    number_row.append(&number_label);
    number_row.append(&number_entry);
    content.append(&number_row);

    let add_btn = gtk::Button::with_label("add");
    add_btn.add_css_class("suggested-action");
    add_btn.set_halign(gtk::Align::Start);
    content.append(&add_btn);

    let scroller = gtk::ScrolledWindow::builder().vexpand(true).hexpand(true).build();
    scroller.set_child(Some(&contact_list.widget()));
    content.append(&scroller);

    container.append(&content);
    window.set_content(Some(&container));
    window.present();

    let config = crate::app::AppState::load();
    let server_url = config.server_url;

    let refresh: Rc<dyn Fn()> = {
        let state = state.clone();
        let contact_list = contact_list.clone();
        Rc::new(move || contact_list.set_items(state.borrow().visible_contacts()))
    };

    // Cached rows render immediately; the fresh list replaces them below.
    if let Ok(cached) = crate::storage::get_contacts() {
        if !cached.is_empty() {
            state.borrow_mut().replace_all(cached);
            refresh();
        }
    }

    {
        let client = ApiClient::new();
        let url = server_url.clone();
        let rx = crate::utils::run_async_to_main(async move { client.list(&url).await });
        let state = state.clone();
        let refresh = refresh.clone();
        let notifications = notifications.clone();
        rx.attach(None, move |res| {
            match res {
                Ok(contacts) => {
                    sync_cache_list(&contacts);
                    state.borrow_mut().replace_all(contacts);
                    refresh();
                }
                Err(err) => {
                    log::warn!("initial load failed: {err}");
                    notifications.show_error("Error retrieving phonebook from server");
                }
            }
            glib::ControlFlow::Continue
        });
    }

    {
        let state = state.clone();
        let refresh = refresh.clone();
        filter_entry.connect_changed(move |entry| {
            state.borrow_mut().set_filter(&entry.text());
            refresh();
        });
    }

    {
        let state = state.clone();
        name_entry.connect_changed(move |entry| {
            state.borrow_mut().set_draft_name(&entry.text());
        });
    }
    {
        let state = state.clone();
        number_entry.connect_changed(move |entry| {
            state.borrow_mut().set_draft_number(&entry.text());
        });
    }

    let submit: Rc<dyn Fn()> = {
        let state = state.clone();
        let refresh = refresh.clone();
        let notifications = notifications.clone();
        let window = window.clone();
        let server_url = server_url.clone();
        let name_entry = name_entry.clone();
        let number_entry = number_entry.clone();
        Rc::new(move || {
            let name = state.borrow().draft_name.clone();
            let payload = state.borrow().draft_payload();
            let existing = state.borrow().find_by_name(&name).cloned();

            if let Some(person) = existing {
                let prompt = format!(
                    "{} is already added to phonebook, replace old number with a new one?",
                    name
                );
                let on_confirm: Rc<dyn Fn()> = {
                    let state = state.clone();
                    let refresh = refresh.clone();
                    let notifications = notifications.clone();
                    let server_url = server_url.clone();
                    let name_entry = name_entry.clone();
                    let number_entry = number_entry.clone();
                    let name = name.clone();
                    let payload = payload.clone();
                    let id = person.id.clone();
                    Rc::new(move || {
                        let rx = crate::utils::run_async_to_main({
                            let server_url = server_url.clone();
                            let id = id.clone();
                            let payload = payload.clone();
                            async move { ApiClient::new().update(&server_url, &id, &payload).await }
                        });
                        let state = state.clone();
                        let refresh = refresh.clone();
                        let notifications = notifications.clone();
                        let name = name.clone();
                        let name_entry = name_entry.clone();
                        let number_entry = number_entry.clone();
                        rx.attach(None, move |res| {
                            match res {
                                Ok(returned) => {
                                    state.borrow_mut().replace(returned);
                                    state.borrow_mut().clear_draft();
                                    sync_cache(&state);
                                    name_entry.set_text("");
                                    number_entry.set_text("");
                                    refresh();
                                    notifications.show_success(&format!("Updated '{}'", name));
                                }
                                Err(err) => {
                                    log::warn!("update failed: {err}");
                                    notifications.show_error(&add_failure_message(&err, &name));
                                }
                            }
                            glib::ControlFlow::Continue
                        });
                    })
                };
                confirm(&window, &prompt, on_confirm);
            } else {
                let rx = crate::utils::run_async_to_main({
                    let server_url = server_url.clone();
                    let payload = payload.clone();
                    async move { ApiClient::new().create(&server_url, &payload).await }
                });
                let state = state.clone();
                let refresh = refresh.clone();
                let notifications = notifications.clone();
                let name = name.clone();
                let name_entry = name_entry.clone();
                let number_entry = number_entry.clone();
                rx.attach(None, move |res| {
                    match res {
                        Ok(returned) => {
                            state.borrow_mut().append(returned);
                            state.borrow_mut().clear_draft();
                            sync_cache(&state);
                            name_entry.set_text("");
                            number_entry.set_text("");
                            refresh();
                            notifications.show_success(&format!("Added '{}'", name));
                        }
                        Err(err) => {
                            log::warn!("create failed: {err}");
                            notifications.show_error(&add_failure_message(&err, &name));
                        }
                    }
                    glib::ControlFlow::Continue
                });
            }
        })
    };
    {
        let submit = submit.clone();
        add_btn.connect_clicked(move |_| (submit)());
    }
    {
        let submit = submit.clone();
        name_entry.connect_activate(move |_| (submit)());
    }
    {
        let submit = submit.clone();
        number_entry.connect_activate(move |_| (submit)());
    }

    {
        let state = state.clone();
        let refresh = refresh.clone();
        let notifications = notifications.clone();
        let window = window.clone();
        let server_url = server_url.clone();
        contact_list.connect_delete(move |id| {
            let name = match state.borrow().name_of(&id) {
                Some(name) => name,
                None => {
                    log::warn!("delete requested for unknown contact id {id}");
                    return;
                }
            };
            let prompt = format!("Delete {} ?", name);
            let on_confirm: Rc<dyn Fn()> = {
                let state = state.clone();
                let refresh = refresh.clone();
                let notifications = notifications.clone();
                let server_url = server_url.clone();
                let id = id.clone();
                let name = name.clone();
                Rc::new(move || {
                    let rx = crate::utils::run_async_to_main({
                        let server_url = server_url.clone();
                        let id = id.clone();
                        async move { ApiClient::new().remove(&server_url, &id).await }
                    });
                    let state = state.clone();
                    let refresh = refresh.clone();
                    let notifications = notifications.clone();
                    let id = id.clone();
                    let name = name.clone();
                    rx.attach(None, move |res| {
                        match res {
                            Ok(()) => {
                                state.borrow_mut().remove(&id);
                                sync_cache(&state);
                                refresh();
                                notifications.show_success(&format!("Deleted '{}'", name));
                            }
                            Err(err) => {
                                log::warn!("delete failed: {err}");
                                notifications.show_error(&format!(
                                    "Error deleting '{}' from server",
                                    name
                                ));
                            }
                        }
                        glib::ControlFlow::Continue
                    });
                })
            };
            confirm(&window, &prompt, on_confirm);
        });
    }

    {
        let app = app.clone();
        let window = window.clone();
        settings_btn.connect_clicked(move |_| {
            crate::ui::settings::show_settings_window(&app);
            window.close();
        });
    }
}

/// Cancel/OK dialog gating a continuation; Cancel aborts with no state
/// change and no notification.
fn confirm(parent: &adw::ApplicationWindow, message: &str, on_confirm: Rc<dyn Fn()>) {
    let dialog = gtk::Dialog::builder()
        .title("Phonebook")
        .transient_for(parent)
        .modal(true)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    let label = gtk::Label::new(Some(message));
    label.set_wrap(true);
    content.append(&label);
    dialog.content_area().append(&content);

    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ok_btn = dialog.add_button("OK", gtk::ResponseType::Ok);
    ok_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    dialog.connect_response(move |dlg, resp| {
        if resp == gtk::ResponseType::Ok {
            (on_confirm)();
        }
        dlg.close();
    });

    dialog.present();
}

/// Create and update share one failure rule: a server-supplied message is
/// shown verbatim, anything else falls back to the generic add error.
fn add_failure_message(err: &ApiError, name: &str) -> String {
    match err {
        ApiError::Validation { message } => message.clone(),
        _ => format!("Error adding '{}' to server", name),
    }
}

fn sync_cache(state: &Rc<RefCell<Phonebook>>) {
    sync_cache_list(state.borrow().contacts());
}

fn sync_cache_list(contacts: &[crate::api::models::Contact]) {
    if let Err(e) = crate::storage::replace_contacts(contacts) {
        log::warn!("failed to cache contacts: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::add_failure_message;
    use crate::api::error::ApiError;

    #[test]
    fn validation_errors_surface_the_server_message() {
        let err = ApiError::Validation { message: "name must be unique".to_string() };
        assert_eq!(add_failure_message(&err, "Ann"), "name must be unique");
    }

    #[test]
    fn other_errors_fall_back_to_the_generic_message() {
        let err = ApiError::Server { status: 500 };
        assert_eq!(add_failure_message(&err, "Ann"), "Error adding 'Ann' to server");
    }
}
