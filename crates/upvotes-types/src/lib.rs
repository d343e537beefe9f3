//! Shared records for actions, steps, upvotes and users.
//!
//! These shapes mirror the rows stored in the `actions`, `users` and
//! `upvotes` tables and are what both client crates hand back to callers.

use serde::{Deserialize, Serialize};

/// One instruction within an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub label: String,
    pub description: String,
    /// URL the step points at.
    pub link: String,
}

/// A user-submitted item that can receive upvotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Server-assigned identifier, absent before the row is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    /// Number of upvote rows for this action, computed at read time.
    #[serde(default)]
    pub upvotes: i64,
    /// Steps in display order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Owning user id.
    pub user_id: String,
    /// Display name of the owner, present only when the query embedded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Matches the identity provider's user id.
    pub id: String,
    pub name: String,
}

/// Name-only projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    pub name: String,
}

/// A vote linking one user to one action. Existence is the only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Upvote<'a> {
    pub action_id: i64,
    pub user_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_deserializes_without_optional_fields() {
        let action: Action = serde_json::from_str(
            r#"{"title":"Plant a tree","description":"Go outside","user_id":"u1"}"#,
        )
        .expect("deserialize");

        assert_eq!(action.id, None);
        assert_eq!(action.upvotes, 0);
        assert!(action.steps.is_empty());
        assert_eq!(action.author_name, None);
    }

    #[test]
    fn action_steps_keep_their_order() {
        let action: Action = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Cut plastic",
                "description": "Less waste",
                "user_id": "u1",
                "steps": [
                    {"id": 3, "label": "Second by id", "description": "b", "link": "https://b.example"},
                    {"id": 1, "label": "First by id", "description": "a", "link": "https://a.example"}
                ]
            }"#,
        )
        .expect("deserialize");

        let labels: Vec<&str> = action.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Second by id", "First by id"]);
    }

    #[test]
    fn action_omits_absent_id_and_author_when_serialized() {
        let action = Action {
            id: None,
            title: "t".into(),
            description: "d".into(),
            upvotes: 0,
            steps: vec![],
            user_id: "u1".into(),
            author_name: None,
        };

        let json = serde_json::to_value(&action).expect("serialize");
        assert!(json.get("id").is_none());
        assert!(json.get("author_name").is_none());
        assert_eq!(json["upvotes"], 0);
    }

    #[test]
    fn upvote_serializes_as_row() {
        let upvote = Upvote {
            action_id: 4,
            user_id: "user_2abc",
        };
        let json = serde_json::to_value(upvote).expect("serialize");
        assert_eq!(json, serde_json::json!({"action_id": 4, "user_id": "user_2abc"}));
    }
}
