mod http_directory;

pub use http_directory::*;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Resolves a user id to the email address it signed up with.
///
/// Lookups are best-effort: an unknown user or a failing backend both yield `None`.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn email_of(&self, user_id: &str) -> Option<String>;
}

/// In-process directory, filled by the caller.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    emails: RwLock<HashMap<String, String>>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: impl Into<String>, email: impl Into<String>) {
        if let Ok(mut emails) = self.emails.write() {
            emails.insert(user_id.into(), email.into());
        }
    }

    #[must_use]
    pub fn with(self, user_id: impl Into<String>, email: impl Into<String>) -> Self {
        self.insert(user_id, email);
        self
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn email_of(&self, user_id: &str) -> Option<String> {
        self.emails.read().ok()?.get(user_id).cloned()
    }
}
