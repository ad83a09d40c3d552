use crate::database::RecordStore;
use crate::directory::{Directory, HttpDirectory};
use crate::notifications::{LogMailer, Mailer, Notifier, ResendMailer};
use crate::utils::{Clock, SystemClock};
use app_state::{AppSettings, SharingSettings};
use bon::Builder;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Everything the sharing services need, constructed once per process and passed by reference.
#[derive(Builder, Clone)]
pub struct SharingContext {
    pub store: Arc<dyn RecordStore>,
    pub directory: Arc<dyn Directory>,
    pub notifier: Notifier,
    #[builder(default = Arc::new(SystemClock) as Arc<dyn Clock>)]
    pub clock: Arc<dyn Clock>,
    #[builder(default)]
    pub settings: SharingSettings,
}

impl SharingContext {
    /// Wires the production collaborators from settings. The returned handle is the
    /// notification worker, which finishes once the context (and its clones) are dropped.
    pub fn from_settings(
        settings: &AppSettings,
        store: Arc<dyn RecordStore>,
    ) -> color_eyre::Result<(Self, JoinHandle<()>)> {
        let http_client = Client::new();
        let directory = HttpDirectory::new(http_client.clone(), &settings.directory)?;

        let mailer: Arc<dyn Mailer> = match &settings.email.api_key {
            Some(api_key) => Arc::new(ResendMailer::new(
                http_client,
                settings.email.api_url.clone(),
                api_key.clone(),
            )),
            None => {
                info!("No email API key configured, invite emails will only be logged.");
                Arc::new(LogMailer)
            }
        };
        let (notifier, worker) = Notifier::start(mailer, settings.email.from.clone());

        let context = Self::builder()
            .store(store)
            .directory(Arc::new(directory))
            .notifier(notifier)
            .settings(settings.sharing.clone())
            .build();
        Ok((context, worker))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn db(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}
