use serde::Serialize;
use serde_json::Value;

/// Converts any serializable result into a JSON-safe plain value.
///
/// Rich fields (chrono datetimes, etc.) become their JSON representations,
/// so the value can be merged into an action response and sent to any
/// caller without non-serializable leftovers. Normalizing an already
/// normalized value yields the same value.
pub fn parse_action_response<T: Serialize>(response: &T) -> Result<Value, String> {
    serde_json::to_value(response).map_err(|e| format!("Failed to normalize response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Created {
        #[serde(rename = "_id")]
        id: String,
        title: String,
        #[serde(rename = "_createdAt")]
        created_at: chrono::DateTime<Utc>,
        views: Option<i64>,
    }

    #[test]
    fn test_datetime_becomes_iso_string() {
        let created = Created {
            id: "abc".to_string(),
            title: "Acme".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 11, 5, 12, 30, 0).unwrap(),
            views: None,
        };

        let value = parse_action_response(&created).unwrap();
        let created_at = value["_createdAt"].as_str().expect("must be a string");
        assert!(created_at.starts_with("2024-11-05T12:30:00"));
    }

    #[test]
    fn test_idempotent() {
        let created = Created {
            id: "abc".to_string(),
            title: "Acme".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 11, 5, 12, 30, 0).unwrap(),
            views: Some(3),
        };

        let once = parse_action_response(&created).unwrap();
        let twice = parse_action_response(&once).unwrap();
        assert_eq!(once, twice);
    }
}
