mod task_runner;

use app_state::load_app_settings;
use clap::{Parser, Subcommand};
use color_eyre::Result;
use task_runner::run_task;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about = "Maintenance tasks for album sharing", long_about = None)]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand, Debug)]
pub enum Task {
    /// Apply pending database migrations.
    Migrate,
    /// Promote the pending invites addressed to a user's email into grants.
    Reconcile { user_id: String },
    /// Mark every pending album invite past its deadline as expired.
    ExpireInvites,
    /// Print the role a user (or an anonymous caller) has on an album.
    CheckAccess {
        album_id: Uuid,
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = load_app_settings()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    run_task(args.task, settings).await
}
