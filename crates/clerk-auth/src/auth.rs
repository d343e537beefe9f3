//! Lazily loaded Clerk handle.

use crate::client::{ClerkClient, ClerkSettings};
use crate::error::{AuthError, AuthResult};
use crate::user::ClerkUser;
use tokio::sync::OnceCell;

/// Owns the Clerk client for the lifetime of the application.
///
/// The handle is written once by a successful [`initialize`](Self::initialize)
/// and read afterwards. Concurrent `initialize` calls run a single load.
#[derive(Debug)]
pub struct ClerkAuth {
    settings: ClerkSettings,
    http_client: reqwest::Client,
    handle: OnceCell<ClerkClient>,
}

impl ClerkAuth {
    pub fn new(settings: ClerkSettings) -> Self {
        Self::with_http_client(reqwest::Client::new(), settings)
    }

    pub fn with_http_client(http_client: reqwest::Client, settings: ClerkSettings) -> Self {
        Self {
            settings,
            http_client,
            handle: OnceCell::new(),
        }
    }

    /// Build the client and run the load step.
    ///
    /// A missing or malformed publishable key fails before the load step.
    /// On failure the handle stays empty and a later call retries.
    pub async fn initialize(&self) -> AuthResult<&ClerkClient> {
        self.handle
            .get_or_try_init(|| async {
                let client =
                    ClerkClient::with_http_client(self.http_client.clone(), self.settings.clone())?;
                client.load().await?;
                Ok::<_, AuthError>(client)
            })
            .await
            .inspect_err(|err| tracing::error!(error = %err, "Failed to initialize Clerk"))
    }

    /// The loaded client, if [`initialize`](Self::initialize) has succeeded.
    pub fn handle(&self) -> Option<&ClerkClient> {
        self.handle.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// Look a user up by id.
    ///
    /// Returns [`AuthError::NotInitialized`] before a successful
    /// `initialize`, and `Ok(None)` when Clerk has no such user.
    pub async fn get_user(&self, user_id: &str) -> AuthResult<Option<ClerkUser>> {
        let Some(client) = self.handle() else {
            tracing::error!(user_id, "Clerk not initialized");
            return Err(AuthError::NotInitialized);
        };

        client
            .fetch_user(user_id)
            .await
            .inspect_err(|err| tracing::error!(user_id, error = %err, "Error fetching user"))
    }
}
