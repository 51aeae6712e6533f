use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Wishes --

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishRequest {
    pub name: String,
    #[serde(default)]
    pub relation: Option<String>,
    pub message: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

/// Fully-typed output record. Every field is always present in the JSON
/// body; `relation` and `created_at` serialize as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wish {
    pub id: String,
    pub name: String,
    pub relation: Option<String>,
    pub message: String,
    pub is_public: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_serializes_as_rfc3339_text() {
        let wish = Wish {
            id: "abc".into(),
            name: "Ann".into(),
            relation: None,
            message: "Happy bday!".into(),
            is_public: true,
            created_at: Some("2025-06-01T12:00:00Z".parse().unwrap()),
        };

        let json = serde_json::to_value(&wish).unwrap();
        assert_eq!(json["created_at"], "2025-06-01T12:00:00Z");
        assert_eq!(json["relation"], serde_json::Value::Null);
    }

    #[test]
    fn create_request_defaults_is_public_to_true() {
        let req: CreateWishRequest =
            serde_json::from_str(r#"{"name":"Ann","message":"hi"}"#).unwrap();
        assert!(req.is_public);
        assert_eq!(req.relation, None);
    }

    #[test]
    fn create_request_requires_message() {
        let result = serde_json::from_str::<CreateWishRequest>(r#"{"name":"Ann"}"#);
        assert!(result.is_err());
    }
}
