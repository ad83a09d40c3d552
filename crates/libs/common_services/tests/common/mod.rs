#![allow(dead_code)]

use app_state::SharingSettings;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use color_eyre::Result;
use common_services::SharingContext;
use common_services::api::album::interfaces::CreateAlbumRequest;
use common_services::api::album::service::create_album;
use common_services::api::family::interfaces::FamilyInviteRequest;
use common_services::api::family::service::{accept_family_invite, invite_family_member};
use common_services::database::album::AlbumRole;
use common_services::database::media_item::MediaItem;
use common_services::database::{MediaStore, MemoryStore};
use common_services::directory::MemoryDirectory;
use common_services::notifications::{MailError, Mailer, Notifier, OutgoingEmail};
use common_services::utils::{Clock, FixedClock};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const OWNER: &str = "owner-1";
pub const OWNER_EMAIL: &str = "owner@x.com";
pub const ALICE: &str = "alice-1";
pub const ALICE_EMAIL: &str = "a@x.com";
pub const BOB: &str = "bob-1";
pub const BOB_EMAIL: &str = "b@x.com";
pub const STRANGER: &str = "stranger-1";

/// Keeps every email it is asked to deliver.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }
        Ok(())
    }
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

/// Rejects every email.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn deliver(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::Rejected("mail provider is down".to_owned()))
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A sharing context over in-memory collaborators, with handles to steer and inspect them.
pub struct TestContext {
    pub sharing: SharingContext,
    pub clock: Arc<FixedClock>,
    pub directory: Arc<MemoryDirectory>,
    pub mailer: Arc<RecordingMailer>,
    worker: JoinHandle<()>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(SharingSettings::default())
    }

    pub fn with_settings(settings: SharingSettings) -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        Self::build(settings, mailer.clone(), mailer)
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self::build(
            SharingSettings::default(),
            mailer,
            Arc::new(RecordingMailer::default()),
        )
    }

    fn build(
        settings: SharingSettings,
        mailer: Arc<dyn Mailer>,
        recorder: Arc<RecordingMailer>,
    ) -> Self {
        let clock = Arc::new(FixedClock::new(start_time()));
        let directory = Arc::new(
            MemoryDirectory::new()
                .with(OWNER, OWNER_EMAIL)
                .with(ALICE, ALICE_EMAIL)
                .with(BOB, BOB_EMAIL),
        );
        let (notifier, worker) = Notifier::start(mailer, "Family Album <noreply@localhost>".to_owned());
        let sharing = SharingContext::builder()
            .store(Arc::new(MemoryStore::new()))
            .directory(directory.clone())
            .notifier(notifier)
            .clock(clock.clone() as Arc<dyn Clock>)
            .settings(settings)
            .build();
        Self {
            sharing,
            clock,
            directory,
            mailer: recorder,
            worker,
        }
    }

    pub async fn album(&self, owner: &str, name: &str) -> Result<Uuid> {
        let album = create_album(
            &self.sharing,
            owner,
            CreateAlbumRequest {
                name: name.to_owned(),
                ..Default::default()
            },
        )
        .await?;
        Ok(album.id)
    }

    pub async fn media(&self, owner: &str, file_name: &str) -> Result<Uuid> {
        let item = MediaStore::create(
            self.sharing.db(),
            &MediaItem {
                id: Uuid::new_v4(),
                owner_id: owner.to_owned(),
                file_name: file_name.to_owned(),
                content_type: "image/jpeg".to_owned(),
                created_at: self.sharing.now(),
            },
        )
        .await?;
        Ok(item.id)
    }

    /// Stops the notification worker once the queue is empty and returns what was sent.
    pub async fn finish(self) -> Result<Vec<OutgoingEmail>> {
        let Self {
            sharing,
            mailer,
            worker,
            ..
        } = self;
        drop(sharing);
        worker.await?;
        Ok(mailer.sent())
    }
}

/// The token is the last path segment of an invite link.
pub fn token_of(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or_default()
}

/// Invites `member` into the owner's family and accepts on their behalf. Returns the record id.
pub async fn join_family(
    ctx: &TestContext,
    owner: &str,
    member: &str,
    email: &str,
    role: AlbumRole,
) -> Result<Uuid> {
    let invite = invite_family_member(
        &ctx.sharing,
        owner,
        FamilyInviteRequest {
            email: email.to_owned(),
            role,
        },
    )
    .await?;
    accept_family_invite(&ctx.sharing, member, token_of(&invite.invite_link)).await?;
    Ok(invite.id)
}
