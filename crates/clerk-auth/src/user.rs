//! User profile as returned by the Clerk Backend API.

use serde::{Deserialize, Serialize};

/// One email address attached to a Clerk user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub id: Option<String>,
    pub email_address: String,
}

/// A Clerk user. Fields not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClerkUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub primary_email_address_id: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
}

impl ClerkUser {
    /// The primary email, falling back to the first listed address.
    pub fn primary_email(&self) -> Option<&str> {
        let primary = self.primary_email_address_id.as_deref().and_then(|id| {
            self.email_addresses
                .iter()
                .find(|email| email.id.as_deref() == Some(id))
        });

        primary
            .or_else(|| self.email_addresses.first())
            .map(|email| email.email_address.as_str())
    }

    /// Name to show for this user: full name, then username, then email, then id.
    pub fn display_name(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            return full_name;
        }

        self.username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.primary_email())
            .unwrap_or(self.id.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(json: serde_json::Value) -> ClerkUser {
        serde_json::from_value(json).expect("deserialize user")
    }

    #[test]
    fn display_name_prefers_full_name() {
        let u = user(serde_json::json!({
            "id": "user_1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "username": "ada"
        }));
        assert_eq!(u.display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_falls_back_to_username_then_email_then_id() {
        let u = user(serde_json::json!({ "id": "user_1", "first_name": "", "username": "ada" }));
        assert_eq!(u.display_name(), "ada");

        let u = user(serde_json::json!({
            "id": "user_1",
            "primary_email_address_id": "idn_2",
            "email_addresses": [
                { "id": "idn_1", "email_address": "old@example.com" },
                { "id": "idn_2", "email_address": "ada@example.com" }
            ]
        }));
        assert_eq!(u.display_name(), "ada@example.com");

        let u = user(serde_json::json!({ "id": "user_1" }));
        assert_eq!(u.display_name(), "user_1");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let u = user(serde_json::json!({
            "id": "user_1",
            "object": "user",
            "created_at": 1_700_000_000_000_i64,
            "public_metadata": {}
        }));
        assert_eq!(u.id, "user_1");
    }
}
