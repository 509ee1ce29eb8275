use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Request body for create and update. The server assigns the id.
#[derive(Debug, Serialize, Clone)]
pub struct ContactPayload {
    pub name: String,
    pub number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_parses_from_server_json() {
        let json = r#"[{"id":"1","name":"Ann","number":"123"}]"#;
        let contacts: Vec<Contact> = serde_json::from_str(json).unwrap();
        assert_eq!(
            contacts,
            vec![Contact { id: "1".to_string(), name: "Ann".to_string(), number: "123".to_string() }]
        );
    }

    #[test]
    fn payload_serializes_without_an_id() {
        let payload = ContactPayload { name: "Ann".to_string(), number: "123".to_string() };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Ann", "number": "123"}));
    }
}
