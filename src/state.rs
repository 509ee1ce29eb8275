use crate::api::models::{Contact, ContactPayload};

/// In-memory phonebook state: the contact list plus the transient UI state
/// (draft form fields, filter text). All mutation goes through the methods
/// below, on the main thread only; the window rebuilds the visible rows
/// after each change. List mutations happen only after the server confirmed
/// the matching remote operation.
#[derive(Debug, Default)]
pub struct Phonebook {
    contacts: Vec<Contact>,
    pub draft_name: String,
    pub draft_number: String,
    pub filter: String,
    pub show_all: bool,
}

impl Phonebook {
    pub fn new() -> Self {
        Self {
            show_all: true,
            ..Self::default()
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    pub fn set_filter(&mut self, text: &str) {
        self.show_all = text.is_empty();
        self.filter = text.to_string();
    }

    pub fn set_draft_name(&mut self, value: &str) {
        self.draft_name = value.to_string();
    }

    pub fn set_draft_number(&mut self, value: &str) {
        self.draft_number = value.to_string();
    }

    /// Everything when the filter is empty, otherwise a case-insensitive
    /// substring match against each contact's name.
    pub fn visible_contacts(&self) -> Vec<Contact> {
        if self.show_all {
            return self.contacts.clone();
        }
        let needle = self.filter.to_uppercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_uppercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Exact, case-sensitive match. This is the duplicate check that gates
    /// the replace-old-number flow on submit.
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.name == name)
    }

    pub fn name_of(&self, id: &str) -> Option<String> {
        self.contacts.iter().find(|c| c.id == id).map(|c| c.name.clone())
    }

    pub fn append(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// In-place replacement by id; ids not in the list are ignored.
    pub fn replace(&mut self, contact: Contact) {
        if let Some(slot) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *slot = contact;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.contacts.retain(|c| c.id != id);
    }

    pub fn clear_draft(&mut self) {
        self.draft_name.clear();
        self.draft_number.clear();
    }

    pub fn draft_payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.draft_name.clone(),
            number: self.draft_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, number: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    fn seeded() -> Phonebook {
        let mut pb = Phonebook::new();
        pb.replace_all(vec![
            contact("1", "Ann", "123"),
            contact("2", "Bob", "555"),
            contact("3", "Carol", "777"),
        ]);
        pb
    }

    #[test]
    fn loaded_contacts_are_all_visible_with_empty_filter() {
        let mut pb = Phonebook::new();
        pb.replace_all(vec![contact("1", "Ann", "123")]);
        assert_eq!(pb.visible_contacts(), vec![contact("1", "Ann", "123")]);
    }

    #[test]
    fn filter_matches_substrings_case_insensitively() {
        let mut pb = seeded();
        pb.set_filter("aN");
        assert!(!pb.show_all);
        let names: Vec<_> = pb.visible_contacts().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ann"]);
    }

    #[test]
    fn clearing_the_filter_restores_the_full_list() {
        let mut pb = seeded();
        let before = pb.visible_contacts();
        pb.set_filter("bo");
        pb.set_filter("");
        assert!(pb.show_all);
        assert_eq!(pb.visible_contacts(), before);
    }

    #[test]
    fn show_all_tracks_filter_emptiness() {
        let mut pb = Phonebook::new();
        assert!(pb.show_all);
        pb.set_filter("x");
        assert!(!pb.show_all);
        pb.set_filter("");
        assert!(pb.show_all);
    }

    #[test]
    fn find_by_name_is_case_sensitive_and_exact() {
        let pb = seeded();
        assert!(pb.find_by_name("Ann").is_some());
        assert!(pb.find_by_name("ann").is_none());
        assert!(pb.find_by_name("An").is_none());
    }

    #[test]
    fn replace_keeps_length_and_swaps_the_number() {
        let mut pb = seeded();
        let len = pb.contacts().len();
        pb.replace(contact("1", "Ann", "999"));
        assert_eq!(pb.contacts().len(), len);
        assert_eq!(
            pb.contacts().iter().filter(|c| c.name == "Ann").count(),
            1
        );
        assert_eq!(pb.find_by_name("Ann").unwrap().number, "999");
    }

    #[test]
    fn append_grows_the_list_at_the_end() {
        let mut pb = seeded();
        let len = pb.contacts().len();
        pb.append(contact("4", "Dave", "888"));
        assert_eq!(pb.contacts().len(), len + 1);
        assert_eq!(pb.contacts().last().unwrap().name, "Dave");
    }

    #[test]
    fn remove_drops_exactly_one_contact() {
        let mut pb = seeded();
        pb.remove("2");
        let names: Vec<_> = pb.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Carol"]);
    }

    #[test]
    fn removing_an_unknown_id_fails_lookup_first() {
        let pb = seeded();
        assert_eq!(pb.name_of("99"), None);
    }

    #[test]
    fn create_then_delete_round_trips_to_the_original_list() {
        let mut pb = seeded();
        let before = pb.contacts().to_vec();
        pb.append(contact("4", "Dave", "888"));
        pb.remove("4");
        assert_eq!(pb.contacts(), before.as_slice());
    }

    #[test]
    fn draft_snapshot_and_clear() {
        let mut pb = Phonebook::new();
        pb.set_draft_name("Ann");
        pb.set_draft_number("123");
        let payload = pb.draft_payload();
        assert_eq!((payload.name.as_str(), payload.number.as_str()), ("Ann", "123"));
        pb.clear_draft();
        assert!(pb.draft_name.is_empty());
        assert!(pb.draft_number.is_empty());
    }
}
