use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (after env overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub sharing: RawSharingSettings,
    pub directory: DirectorySettings,
    pub email: RawEmailSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawSharingSettings {
    /// Base url of the web frontend, invite links are built on top of it.
    pub frontend_url: String,
    pub invite_expiry_days: i64,
    /// Length of the random invite token.
    pub invite_token_length: usize,
    /// Lower-case invited emails on write and directory emails on match.
    #[serde(default)]
    pub case_insensitive_emails: bool,
}

/// Identity provider admin API, used to resolve a user id to an email address.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectorySettings {
    pub url: String,
    pub service_key: String,
    pub cache_capacity: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEmailSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
}
