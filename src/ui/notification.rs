use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Transient status region: one error label and one success label. Each kind
/// auto-clears five seconds after it was last set; a newer message of the
/// same kind supersedes the pending clear (the generation check below), so a
/// stale timer never blanks a fresh message. Both kinds may be visible at
/// the same time.
pub struct Notifications {
    root: gtk::Box,
    error_label: gtk::Label,
    success_label: gtk::Label,
    error_seq: Rc<Cell<u64>>,
    success_seq: Rc<Cell<u64>>,
}

impl Notifications {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 4);

        let error_label = gtk::Label::new(None);
        error_label.add_css_class("error");
        error_label.set_halign(gtk::Align::Start);
        error_label.set_wrap(true);
        error_label.set_visible(false);
        root.append(&error_label);

        let success_label = gtk::Label::new(None);
        success_label.add_css_class("success");
        success_label.set_halign(gtk::Align::Start);
        success_label.set_wrap(true);
        success_label.set_visible(false);
        root.append(&success_label);

        Self {
            root,
            error_label,
            success_label,
            error_seq: Rc::new(Cell::new(0)),
            success_seq: Rc::new(Cell::new(0)),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn show_error(&self, message: &str) {
        Self::show(&self.error_label, &self.error_seq, message);
    }

    pub fn show_success(&self, message: &str) {
        Self::show(&self.success_label, &self.success_seq, message);
    }

    fn show(label: &gtk::Label, seq: &Rc<Cell<u64>>, message: &str) {
        label.set_text(message);
        label.set_visible(true);

        let current = seq.get() + 1;
        seq.set(current);

        let label = label.clone();
        let seq = seq.clone();
        glib::timeout_add_local_once(DISMISS_AFTER, move || {
            // only the timer belonging to the latest message may clear it
            if seq.get() == current {
                label.set_visible(false);
                label.set_text("");
            }
        });
    }
}
