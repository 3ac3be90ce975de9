//! Record representation shared by every entity collection.

use serde_json::{Map, Value};

/// Name of the identifier field every record carries.
pub const ID_FIELD: &str = "id";

/// One entity instance: a JSON object with a string `id`.
pub type Record = Map<String, Value>;

/// Get the `id` of a record, if it has a string one.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Build a stored record from a payload: `id` first, then every payload field
/// except any `id` the caller sent.
pub fn with_id(id: &str, payload: Record) -> Record {
    let mut record = Record::with_capacity(payload.len() + 1);
    record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    record.extend(payload.into_iter().filter(|(key, _)| key != ID_FIELD));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_id_puts_id_first_and_drops_payload_id() {
        let payload = json!({ "name": "Ana", "id": "spoofed" });
        let Value::Object(payload) = payload else {
            unreachable!()
        };

        let record = with_id("abc", payload);

        assert_eq!(record_id(&record), Some("abc"));
        assert_eq!(record.keys().next().map(String::as_str), Some(ID_FIELD));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_id_requires_string() {
        let Value::Object(record) = json!({ "id": 7 }) else {
            unreachable!()
        };
        assert_eq!(record_id(&record), None);
    }
}
