//! Request DTOs for the card API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::Card;

/// Maximum accepted length of any card text field, in bytes
pub const MAX_FIELD_LENGTH: usize = 256;

/// Request body for updating the card (PUT /api/card)
///
/// Missing fields are treated as empty strings. Any `id` in the body is
/// ignored; the stored card keeps its identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCardRequest {
    pub email: String,
    pub password: String,
    pub title: String,
}

impl UpdateCardRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let fields = [
            ("email", &self.email),
            ("password", &self.password),
            ("title", &self.title),
        ];

        fields
            .iter()
            .find(|(_, value)| value.len() > MAX_FIELD_LENGTH)
            .map(|(name, _)| {
                format!(
                    "Field '{}' exceeds maximum length of {} bytes",
                    name, MAX_FIELD_LENGTH
                )
            })
    }

    /// Copies the editable fields onto `card`.
    pub fn apply_to(self, card: &mut Card) {
        card.email = self.email;
        card.password = self.password;
        card.title = self.title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"email": "a@b.c", "password": "pw", "title": "Main"}"#;
        let req: UpdateCardRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "a@b.c");
        assert_eq!(req.password, "pw");
        assert_eq!(req.title, "Main");
    }

    #[test]
    fn test_update_request_missing_fields_default() {
        let json = r#"{"id": 42, "title": "Only title"}"#;
        let req: UpdateCardRequest = serde_json::from_str(json).unwrap();
        assert!(req.email.is_empty());
        assert_eq!(req.title, "Only title");
    }

    #[test]
    fn test_validate_too_long() {
        let req = UpdateCardRequest {
            title: "x".repeat(MAX_FIELD_LENGTH + 1),
            ..Default::default()
        };
        let msg = req.validate().unwrap();
        assert!(msg.contains("title"));
    }

    #[test]
    fn test_validate_valid_request() {
        let req = UpdateCardRequest {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
            title: "Main".to_string(),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut card = Card::new(9);
        UpdateCardRequest {
            email: "e".to_string(),
            password: "p".to_string(),
            title: "t".to_string(),
        }
        .apply_to(&mut card);

        assert_eq!(card.id, 9);
        assert_eq!(card.email, "e");
        assert_eq!(card.password, "p");
        assert_eq!(card.title, "t");
    }
}
