use crate::directory::Directory;
use app_state::DirectorySettings;
use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct AdminUser {
    email: Option<String>,
}

/// Looks users up through the identity provider's admin API.
///
/// Found emails are cached for the lifetime of the instance; identity to email bindings
/// are treated as immutable, so there is no invalidation. Misses are not cached.
#[derive(Clone)]
pub struct HttpDirectory {
    http_client: Client,
    base_url: Url,
    service_key: String,
    cache: Cache<String, String>,
}

impl HttpDirectory {
    pub fn new(http_client: Client, settings: &DirectorySettings) -> Result<Self, url::ParseError> {
        Ok(Self {
            http_client,
            base_url: settings.url.parse()?,
            service_key: settings.service_key.clone(),
            cache: Cache::new(settings.cache_capacity),
        })
    }

    async fn fetch_email(&self, user_id: &str) -> Result<Option<String>, reqwest::Error> {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/auth/v1/admin/users/{user_id}"));

        let user: AdminUser = self
            .http_client
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(user.email)
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    #[instrument(skip(self))]
    async fn email_of(&self, user_id: &str) -> Option<String> {
        if let Some(email) = self.cache.get(user_id).await {
            return Some(email);
        }
        match self.fetch_email(user_id).await {
            Ok(Some(email)) => {
                self.cache.insert(user_id.to_owned(), email.clone()).await;
                Some(email)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Directory lookup for {user_id} failed: {e}");
                None
            }
        }
    }
}
