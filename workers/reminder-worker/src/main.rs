use std::time::Duration;

use taskly_atoms::clock::SystemClock;
use taskly_atoms::reminders::ReminderJob;
use taskly_atoms::tasks::DynamoTaskStore;
use taskly_shared::config::AppConfig;
use taskly_shared::email::SesMailer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()?;

    let config = AppConfig::from_env();
    let aws_config = aws_config::load_from_env().await;
    let store = DynamoTaskStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name.clone(),
    );
    let mailer = SesMailer::new(
        aws_sdk_sesv2::Client::new(&aws_config),
        config.sender_email.clone(),
    );
    let job = ReminderJob::new(store, mailer, SystemClock);

    tracing::info!(
        period_secs = config.reminder_interval_secs,
        table = %config.table_name,
        "reminder worker started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.reminder_interval_secs));
    loop {
        interval.tick().await;
        let summary = job.tick().await;
        tracing::info!(
            scanned = summary.scanned,
            sent = summary.sent,
            failed = summary.failed,
            "reminder scan complete"
        );
    }
}
