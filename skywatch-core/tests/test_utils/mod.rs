// File: skywatch-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use skywatch_common::models::{PlayerUuid, StatusPayload, TrackedPlayer};
use skywatch_common::traits::{Notifier, StatusApi};
use skywatch_core::Error;
use skywatch_core::services::{NotificationRoutes, StatusMonitor};

pub const ADMIN: u64 = 900;
pub const ALERT_CHANNEL: u64 = 100;
pub const STATUS_CHANNEL: u64 = 200;

pub fn routes() -> NotificationRoutes {
    NotificationRoutes {
        alert_channel_id: ALERT_CHANNEL,
        status_channel_id: STATUS_CHANNEL,
        admin_user_id: ADMIN,
    }
}

/// The three players watched by default.
pub fn players() -> Vec<TrackedPlayer> {
    vec![
        TrackedPlayer::new("uuid-jason", "YMCAJason1910"),
        TrackedPlayer::new("uuid-tokyo", "Justtokyo"),
        TrackedPlayer::new("uuid-oompa", "OompaLoompaman69"),
    ]
}

#[derive(Debug, Clone)]
pub enum Scripted {
    Payload(StatusPayload),
    TransportError,
}

/// StatusApi double: answers each player with a fixed scripted response and
/// counts calls per player.
#[derive(Default)]
pub struct ScriptedStatusApi {
    responses: Mutex<HashMap<PlayerUuid, Scripted>>,
    calls: Mutex<HashMap<PlayerUuid, usize>>,
}

impl ScriptedStatusApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, uuid: &str, response: Scripted) {
        self.responses.lock().unwrap().insert(PlayerUuid::new(uuid), response);
    }

    pub fn respond_payload(&self, uuid: &str, payload: StatusPayload) {
        self.respond(uuid, Scripted::Payload(payload));
    }

    pub fn calls_for(&self, uuid: &str) -> usize {
        *self.calls.lock().unwrap().get(&PlayerUuid::new(uuid)).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl StatusApi for ScriptedStatusApi {
    async fn fetch_status(&self, uuid: &PlayerUuid) -> Result<StatusPayload, Error> {
        *self.calls.lock().unwrap().entry(uuid.clone()).or_insert(0) += 1;
        let scripted = self.responses.lock().unwrap().get(uuid).cloned();
        match scripted {
            Some(Scripted::Payload(p)) => Ok(p),
            Some(Scripted::TransportError) => Err(Error::Parse("connection reset by peer".into())),
            None => Err(Error::Parse(format!("no scripted response for {uuid}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Channel(u64, String),
    User(u64, String),
}

/// Notifier double that records every message. Sends to `failing_channel`
/// return an error and are not recorded.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    failing_channel: Mutex<Option<u64>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_channel(&self, channel_id: u64) {
        *self.failing_channel.lock().unwrap() = Some(channel_id);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<(), Error> {
        if *self.failing_channel.lock().unwrap() == Some(channel_id) {
            return Err(Error::Platform(format!("channel {channel_id} unavailable")));
        }
        self.sent.lock().unwrap().push(Sent::Channel(channel_id, text.to_string()));
        Ok(())
    }

    async fn send_to_user(&self, user_id: u64, text: &str) -> Result<(), Error> {
        self.sent.lock().unwrap().push(Sent::User(user_id, text.to_string()));
        Ok(())
    }
}

pub fn build_monitor(
    players: Vec<TrackedPlayer>,
    api: &Arc<ScriptedStatusApi>,
    notifier: &Arc<RecordingNotifier>,
) -> StatusMonitor {
    StatusMonitor::new(players, routes(), api.clone(), notifier.clone())
}
