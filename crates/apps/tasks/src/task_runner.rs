use crate::Task;
use app_state::AppSettings;
use color_eyre::Result;
use common_services::SharingContext;
use common_services::api::album::access::check_access;
use common_services::api::sharing::service::{expire_stale_invites, reconcile};
use common_services::database::{PgStore, get_db_pool, run_migrations};
use std::sync::Arc;
use tracing::info;

pub async fn run_task(task: Task, settings: AppSettings) -> Result<()> {
    let pool = get_db_pool(&settings.database).await?;
    if matches!(task, Task::Migrate) {
        run_migrations(&pool).await?;
        info!("✅ Migrations applied.");
        return Ok(());
    }

    let (context, notification_worker) =
        SharingContext::from_settings(&settings, Arc::new(PgStore::new(pool)))?;

    match task {
        Task::Migrate => {}
        Task::Reconcile { user_id } => {
            let summary = reconcile(&context, &user_id).await?;
            info!(
                "🔗 {user_id}: {} invites accepted, {} expired, {} family memberships accepted",
                summary.accepted_invites, summary.expired_invites, summary.accepted_family
            );
        }
        Task::ExpireInvites => {
            let expired = expire_stale_invites(&context).await?;
            info!("⌛ {expired} invites expired.");
        }
        Task::CheckAccess { album_id, user } => {
            let access = check_access(&context, user.as_deref(), album_id).await?;
            info!("🔍 {} on {album_id}: {access:?}", user.as_deref().unwrap_or("anonymous"));
        }
    }

    // Let queued notifications drain before exiting.
    drop(context);
    notification_worker.await?;
    Ok(())
}
