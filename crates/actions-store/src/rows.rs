//! Wire shapes returned by PostgREST and their conversion into domain records.

use serde::{Deserialize, Serialize};
use upvotes_types::{Action, Step};

/// Related-row count as PostgREST embeds it: `upvotes: [{"count": n}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountAggregate {
    pub count: i64,
}

/// Flatten an embedded count aggregate, defaulting to 0 when it is empty.
pub fn flatten_count(aggregate: &[CountAggregate]) -> i64 {
    aggregate.first().map(|agg| agg.count).unwrap_or(0)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerName {
    pub name: Option<String>,
}

/// An `actions` row with its embedded relations.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub user_id: String,
    #[serde(default)]
    pub steps: Option<Vec<Step>>,
    #[serde(default)]
    pub users: Option<OwnerName>,
    #[serde(default)]
    pub upvotes: Option<Vec<CountAggregate>>,
}

impl From<ActionRow> for Action {
    fn from(row: ActionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            upvotes: flatten_count(row.upvotes.as_deref().unwrap_or_default()),
            steps: row.steps.unwrap_or_default(),
            user_id: row.user_id,
            author_name: row.users.and_then(|owner| owner.name),
        }
    }
}

/// An `upvotes` row projected to its action id.
#[derive(Debug, Deserialize)]
pub(crate) struct UpvoteActionId {
    pub action_id: i64,
}

/// Error payload PostgREST sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostgrestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> Action {
        serde_json::from_str::<ActionRow>(json)
            .expect("deserialize row")
            .into()
    }

    #[test]
    fn flatten_count_takes_first_element() {
        let aggregate = [CountAggregate { count: 3 }, CountAggregate { count: 9 }];
        assert_eq!(flatten_count(&aggregate), 3);
    }

    #[test]
    fn flatten_count_of_empty_aggregate_is_zero() {
        assert_eq!(flatten_count(&[]), 0);
    }

    #[test]
    fn action_row_with_empty_aggregate_has_zero_upvotes() {
        let action = row(r#"{"id":1,"title":"t","description":"d","user_id":"u1","upvotes":[]}"#);
        assert_eq!(action.upvotes, 0);
    }

    #[test]
    fn action_row_without_aggregate_has_zero_upvotes() {
        let action = row(r#"{"id":1,"title":"t","description":"d","user_id":"u1"}"#);
        assert_eq!(action.upvotes, 0);
        assert!(action.steps.is_empty());
    }

    #[test]
    fn action_row_with_null_relations() {
        let action = row(
            r#"{"id":1,"title":"t","description":"d","user_id":"u1","steps":null,"users":null,"upvotes":null}"#,
        );
        assert_eq!(action.upvotes, 0);
        assert_eq!(action.author_name, None);
    }

    #[test]
    fn action_row_flattens_count_and_owner() {
        let action = row(
            r#"{
                "id": 12,
                "title": "Bike to work",
                "description": "Skip the car",
                "user_id": "user_2abc",
                "created_at": "2024-03-01T10:00:00Z",
                "users": {"name": "Ada"},
                "upvotes": [{"count": 2}],
                "steps": [{"id": 1, "label": "Pump tyres", "description": "", "link": "https://example.com"}]
            }"#,
        );

        assert_eq!(action.id, Some(12));
        assert_eq!(action.upvotes, 2);
        assert_eq!(action.author_name.as_deref(), Some("Ada"));
        assert_eq!(action.steps.len(), 1);
    }
}
