//! Client handles built once at startup.

use actions_store::ActionsStore;
use clerk_auth::{ClerkAuth, ClerkSettings, PublishableKey};
use upvotes_config::Config;

/// Every remote client the commands need, sharing one connection pool.
pub struct AppClients {
    pub auth: ClerkAuth,
    pub store: ActionsStore,
}

impl AppClients {
    /// Build both clients. An invalid publishable key or Supabase URL fails
    /// here, before any request is sent.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        PublishableKey::parse(&config.clerk_publishable_key)?;
        let supabase_url = config.supabase_url()?;

        let http_client = reqwest::Client::new();
        let store = ActionsStore::with_http_client(
            http_client.clone(),
            supabase_url.as_str(),
            config.supabase_anon_key.clone(),
        );
        let auth = ClerkAuth::with_http_client(http_client, ClerkSettings::from_config(config));

        tracing::debug!(supabase_url = %store.api_url(), "Clients ready");
        Ok(Self { auth, store })
    }
}
