// skywatch-core/src/tasks/status_poll.rs

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::info;

use crate::services::SharedStatusMonitor;

/// Fixed delay between poll cycles.
pub const POLL_INTERVAL: Duration = Duration::from_millis(300_000);

/// Spawns a background task that runs one status cycle per `interval`. The
/// first cycle starts one full interval after spawning.
pub fn spawn_status_poll_task(monitor: SharedStatusMonitor, interval: Duration) -> JoinHandle<()> {
    info!("Status polling every {}s.", interval.as_secs());
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            let mut locked = monitor.lock().await;
            locked.run_once(Utc::now()).await;
        }
    })
}
