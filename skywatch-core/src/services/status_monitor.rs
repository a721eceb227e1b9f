// File: src/services/status_monitor.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use skywatch_common::models::{Notification, NotificationTarget, StatusPayload, TrackedPlayer};
use skywatch_common::traits::{Notifier, StatusApi};

use crate::cache::{NotificationGate, StatusCache};
use crate::services::status_interpreter::StatusInterpreter;

/// Discord destinations for each notification target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationRoutes {
    pub alert_channel_id: u64,
    pub status_channel_id: u64,
    pub admin_user_id: u64,
}

/// Counters for one pass over the player list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub skipped_stopped: usize,
    pub cache_hits: usize,
    pub fetched: usize,
    pub failed: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
    pub newly_stopped: usize,
}

/// Shared between the periodic poll task and the chat command handler.
pub type SharedStatusMonitor = Arc<Mutex<StatusMonitor>>;

/// Owns the response cache and the notification gate for the fixed player
/// list and drives one poll cycle at a time.
pub struct StatusMonitor {
    players: Vec<TrackedPlayer>,
    cache: StatusCache,
    gate: NotificationGate,
    interpreter: StatusInterpreter,
    routes: NotificationRoutes,
    api: Arc<dyn StatusApi>,
    notifier: Arc<dyn Notifier>,
}

impl StatusMonitor {
    pub fn new(
        players: Vec<TrackedPlayer>,
        routes: NotificationRoutes,
        api: Arc<dyn StatusApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            players,
            cache: StatusCache::new(),
            gate: NotificationGate::new(),
            interpreter: StatusInterpreter::new(routes.admin_user_id),
            routes,
            api,
            notifier,
        }
    }

    pub fn into_shared(self) -> SharedStatusMonitor {
        Arc::new(Mutex::new(self))
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    /// Re-arms every stopped player. Returns how many were stopped.
    pub fn reset_all(&mut self) -> usize {
        let cleared = self.gate.reset_all();
        info!("Status monitoring reset; {} player(s) re-armed.", cleared);
        cleared
    }

    /// One pass over the configured players, in order. Errors are contained
    /// per player: a failed fetch or send never ends the cycle early.
    pub async fn run_once(&mut self, now: DateTime<Utc>) -> CycleReport {
        let mut report = CycleReport::default();
        let players = self.players.clone();

        for player in &players {
            let uuid = &player.uuid;

            if self.gate.is_stopped(uuid) {
                debug!("Skipping stopped player {} ({})", player.display_name, uuid);
                report.skipped_stopped += 1;
                continue;
            }

            let cached = self.cache.fresh_payload(uuid, now).cloned();
            let payload = match cached {
                Some(cached) => {
                    debug!("Using cached data for {}", uuid);
                    report.cache_hits += 1;
                    cached
                }
                None => match self.api.fetch_status(uuid).await {
                    Ok(fetched) => {
                        report.fetched += 1;
                        if fetched.is_success() {
                            self.cache.put(uuid.clone(), fetched.clone(), now);
                        }
                        fetched
                    }
                    Err(e) => {
                        if e.is_transport() {
                            error!("Error fetching data for {}: {}", uuid, e);
                        } else {
                            error!("Unexpected error fetching data for {}: {:?}", uuid, e);
                        }
                        report.failed += 1;
                        continue;
                    }
                },
            };

            if let StatusPayload::Failure { cause } = &payload {
                if payload.is_invalid_api_key() {
                    error!("The Hypixel API key has expired or is invalid.");
                } else {
                    error!(
                        "Error fetching status for {}: {}",
                        uuid,
                        cause.as_deref().unwrap_or("no cause given")
                    );
                }
            }

            let outcome = self.interpreter.interpret(&payload, &player.display_name, uuid);
            debug!("{} => rule {}", outcome.subject, outcome.rule);

            for notification in &outcome.notifications {
                match self.deliver(notification).await {
                    Ok(()) => report.notifications_sent += 1,
                    Err(e) => {
                        warn!(
                            "Failed to deliver {:?} notification for {}: {}",
                            notification.target, uuid, e
                        );
                        report.notifications_failed += 1;
                    }
                }
            }

            if outcome.stop && self.gate.stop(uuid.clone()) {
                info!("Stopped monitoring {} ({}) until reset.", player.display_name, uuid);
                report.newly_stopped += 1;
            }
        }

        info!(
            "Status cycle done: fetched={}, cached={}, skipped={}, failed={}, sent={}",
            report.fetched,
            report.cache_hits,
            report.skipped_stopped,
            report.failed,
            report.notifications_sent
        );
        report
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), crate::Error> {
        match notification.target {
            NotificationTarget::AlertChannel => {
                self.notifier
                    .send_to_channel(self.routes.alert_channel_id, &notification.text)
                    .await
            }
            NotificationTarget::StatusChannel => {
                self.notifier
                    .send_to_channel(self.routes.status_channel_id, &notification.text)
                    .await
            }
            NotificationTarget::Admin => {
                self.notifier
                    .send_to_user(self.routes.admin_user_id, &notification.text)
                    .await
            }
        }
    }
}
