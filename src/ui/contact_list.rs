use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::models::Contact;

pub struct ContactList {
    root: gtk::Box,
    list: gtk::ListBox,
    on_delete: RefCell<Option<Rc<dyn Fn(String)>>>,
}

impl ContactList {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);

        let title = gtk::Label::new(Some("Numbers"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        root.append(&list);

        Self {
            root,
            list,
            on_delete: RefCell::new(None),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_delete<F: Fn(String) + 'static>(&self, f: F) {
        *self.on_delete.borrow_mut() = Some(Rc::new(f));
    }

    /// Rebuilds the rows from scratch. The delete button carries the
    /// contact id, never the name: names can collide, ids cannot.
    pub fn set_items(&self, items: Vec<Contact>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        let on_delete = self.on_delete.borrow().clone();
        for contact in items {
            let row = gtk::ListBoxRow::new();
            let hbox = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            hbox.set_margin_top(6);
            hbox.set_margin_bottom(6);
            hbox.set_margin_start(8);
            hbox.set_margin_end(8);

            let label = gtk::Label::new(Some(&format!("{} {}", contact.name, contact.number)));
            label.set_halign(gtk::Align::Start);
            label.set_hexpand(true);
            hbox.append(&label);

            let delete_btn = gtk::Button::with_label("delete");
            delete_btn.add_css_class("destructive-action");
            if let Some(cb) = on_delete.clone() {
                let id = contact.id.clone();
                delete_btn.connect_clicked(move |_| (cb)(id.clone()));
            }
            hbox.append(&delete_btn);

            row.set_child(Some(&hbox));
            self.list.append(&row);
        }
    }
}
