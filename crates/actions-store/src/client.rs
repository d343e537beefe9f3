//! Supabase REST API client for actions, upvotes and users.

use crate::error::{DataError, DataResult};
use crate::rows::{ActionRow, PostgrestErrorBody, UpvoteActionId};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use upvotes_types::{Action, Upvote, User, UserName};

/// Listing projection: every column, the owner's name and the upvote count.
const LIST_SELECT: &str = "*,steps(*),users(name),upvotes(count)";
/// Re-read projection used after an upvote mutation.
const COUNT_SELECT: &str = "*,steps(*),upvotes(count)";
/// Embedded steps come back in insertion order.
const STEPS_ORDER: (&str, &str) = ("steps.order", "id.asc");
/// Asks PostgREST for a bare object instead of an array; 406 when not exactly one row.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
/// PostgREST error code for a single-object request that matched zero or many rows.
const NOT_SINGLE_ROW: &str = "PGRST116";

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Supabase REST client for the actions feature.
#[derive(Clone, Debug)]
pub struct ActionsStore {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
}

impl ActionsStore {
    /// Create a new store client.
    ///
    /// # Arguments
    /// * `api_url` - The Supabase project URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The Supabase anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), api_url, anon_key)
    }

    /// Create a store client that shares an existing connection pool.
    pub fn with_http_client(
        http_client: reqwest::Client,
        api_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_url,
            anon_key: anon_key.into(),
        }
    }

    /// Validate the project URL and create a store client.
    pub fn from_url(api_url: &str, anon_key: impl Into<String>) -> DataResult<Self> {
        url::Url::parse(api_url)?;
        Ok(Self::new(api_url, anon_key))
    }

    /// Project URL this client targets.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build the REST API URL for a table.
    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.api_url, table)
    }

    fn request(&self, method: Method, table: &str, accept: &'static str) -> RequestBuilder {
        self.http_client
            .request(method, self.rest_url(table))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", accept)
    }

    /// Request whose response is a JSON array of rows.
    fn collection(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table, "application/json")
    }

    /// Request whose response is exactly one row as a bare object.
    fn single(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table, SINGLE_OBJECT)
    }

    /// Turn a non-2xx response into a typed error, logging a body summary.
    async fn check(response: Response, context: &'static str) -> DataResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let payload: PostgrestErrorBody = serde_json::from_str(&body).unwrap_or_default();
        Err(Self::api_error(status, &body, payload, context))
    }

    fn api_error(
        status: StatusCode,
        body: &str,
        payload: PostgrestErrorBody,
        context: &'static str,
    ) -> DataError {
        let body_summary = summarize_response_body(body);
        tracing::error!(
            status = %status,
            code = payload.code.as_deref().unwrap_or("-"),
            body_summary = %body_summary,
            "{context}"
        );

        let message = payload
            .message
            .unwrap_or_else(|| format!("{} ({})", context, body_summary));

        if status == StatusCode::CONFLICT {
            return DataError::Conflict(message);
        }

        DataError::Api {
            status: status.as_u16(),
            code: payload.code,
            message,
        }
    }

    /// Send a request built with [`Self::single`]. `Ok(None)` when no row matched.
    ///
    /// Only a 406 carrying `PGRST116` means "no row"; other 406s are errors.
    async fn fetch_single<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &'static str,
    ) -> DataResult<Option<T>> {
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_ACCEPTABLE {
            let body = response.text().await.unwrap_or_default();
            let payload: PostgrestErrorBody = serde_json::from_str(&body).unwrap_or_default();
            if payload.code.as_deref() == Some(NOT_SINGLE_ROW) {
                return Ok(None);
            }
            return Err(Self::api_error(status, &body, payload, context));
        }

        let response = Self::check(response, context).await?;
        Ok(Some(response.json().await?))
    }

    /// Fetch every action with its owner's name and flattened upvote count.
    pub async fn fetch_actions(&self) -> DataResult<Vec<Action>> {
        let result: DataResult<Vec<Action>> = async {
            let response = self
                .collection(Method::GET, "actions")
                .query(&[("select", LIST_SELECT), STEPS_ORDER])
                .send()
                .await?;
            let response = Self::check(response, "Failed to fetch actions").await?;

            let rows: Vec<ActionRow> = response.json().await?;
            tracing::debug!("Fetched {} actions", rows.len());
            Ok(rows.into_iter().map(Action::from).collect())
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, "Error fetching actions"))
    }

    /// Fetch the ids of every action the user has upvoted.
    pub async fn fetch_user_upvotes(&self, user_id: &str) -> DataResult<Vec<i64>> {
        let result: DataResult<Vec<i64>> = async {
            let response = self
                .collection(Method::GET, "upvotes")
                .query(&[("select", "action_id".to_string()), ("user_id", eq(user_id))])
                .send()
                .await?;
            let response = Self::check(response, "Failed to fetch user upvotes").await?;

            let rows: Vec<UpvoteActionId> = response.json().await?;
            Ok(rows.into_iter().map(|row| row.action_id).collect())
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(user_id, error = %err, "Error fetching user upvotes")
        })
    }

    /// Record an upvote, then re-read the action's count.
    ///
    /// A second upvote for the same pair is rejected by the table's unique
    /// key and returned as [`DataError::Conflict`].
    pub async fn upvote_action(&self, action_id: i64, user_id: &str) -> DataResult<Action> {
        let result: DataResult<Action> = async {
            let response = self
                .collection(Method::POST, "upvotes")
                .header("Prefer", "return=minimal")
                .json(&Upvote { action_id, user_id })
                .send()
                .await?;
            Self::check(response, "Failed to insert upvote").await?;

            tracing::debug!(action_id, user_id, "Upvote inserted");
            self.fetch_action_with_count(action_id).await
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(action_id, user_id, error = %err, "Error upvoting action")
        })
    }

    /// Delete the user's upvote for the action, then re-read the count.
    ///
    /// Deleting a pair that has no row is not an error.
    pub async fn remove_upvote(&self, action_id: i64, user_id: &str) -> DataResult<Action> {
        let result: DataResult<Action> = async {
            let response = self
                .collection(Method::DELETE, "upvotes")
                .query(&[("action_id", eq(action_id)), ("user_id", eq(user_id))])
                .header("Prefer", "return=minimal")
                .send()
                .await?;
            Self::check(response, "Failed to delete upvote").await?;

            tracing::debug!(action_id, user_id, "Upvote removed");
            self.fetch_action_with_count(action_id).await
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(action_id, user_id, error = %err, "Error removing upvote")
        })
    }

    /// Fetch one action with its current upvote count.
    pub async fn fetch_action_with_count(&self, action_id: i64) -> DataResult<Action> {
        let request = self
            .single(Method::GET, "actions")
            .query(&[("select", COUNT_SELECT.to_string()), ("id", eq(action_id))])
            .query(&[STEPS_ORDER]);

        let row: Option<ActionRow> =
            Self::fetch_single(request, "Failed to fetch action upvote count").await?;

        row.map(Action::from).ok_or_else(|| DataError::NotFound {
            table: "actions",
            key: action_id.to_string(),
        })
    }

    /// Insert the user row, or update its name if the id already exists.
    pub async fn create_or_update_user(&self, user_id: &str, name: &str) -> DataResult<User> {
        let result: DataResult<User> = async {
            let request = self
                .single(Method::POST, "users")
                .query(&[("on_conflict", "id")])
                .header("Prefer", "resolution=merge-duplicates,return=representation")
                .json(&User {
                    id: user_id.to_string(),
                    name: name.to_string(),
                });

            let user: Option<User> = Self::fetch_single(request, "Failed to upsert user").await?;
            let user = user.ok_or_else(|| DataError::NotFound {
                table: "users",
                key: user_id.to_string(),
            })?;

            tracing::info!(user_id, "User created or updated");
            Ok(user)
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(user_id, error = %err, "Error creating/updating user")
        })
    }

    /// Fetch the user's display name. `Ok(None)` when no such user exists.
    pub async fn get_user(&self, user_id: &str) -> DataResult<Option<UserName>> {
        let result: DataResult<Option<UserName>> = async {
            let request = self
                .single(Method::GET, "users")
                .query(&[("select", "name".to_string()), ("id", eq(user_id))]);

            let user: Option<UserName> = Self::fetch_single(request, "Failed to fetch user").await?;
            if user.is_none() {
                tracing::debug!(user_id, "No user row");
            }
            Ok(user)
        }
        .await;
        result.inspect_err(|err| tracing::error!(user_id, error = %err, "Error fetching user"))
    }

    /// Rename an existing user.
    pub async fn update_user_name(&self, user_id: &str, name: &str) -> DataResult<User> {
        let result: DataResult<User> = async {
            let request = self
                .single(Method::PATCH, "users")
                .query(&[("id", eq(user_id))])
                .header("Prefer", "return=representation")
                .json(&serde_json::json!({ "name": name }));

            let user: Option<User> =
                Self::fetch_single(request, "Failed to update user name").await?;
            let user = user.ok_or_else(|| DataError::NotFound {
                table: "users",
                key: user_id.to_string(),
            })?;

            tracing::info!(user_id, "User name updated");
            Ok(user)
        }
        .await;
        result.inspect_err(|err| tracing::error!(user_id, error = %err, "Error updating user name"))
    }
}
