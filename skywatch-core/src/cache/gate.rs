use std::collections::HashSet;

use skywatch_common::models::PlayerUuid;

/// Players whose monitoring has resolved (reported offline or off Skyblock).
/// A stopped player is neither fetched nor re-reported until `reset_all`.
#[derive(Debug, Clone, Default)]
pub struct NotificationGate {
    stopped: HashSet<PlayerUuid>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self, uuid: &PlayerUuid) -> bool {
        self.stopped.contains(uuid)
    }

    /// Returns `true` if the player was active before this call.
    pub fn stop(&mut self, uuid: PlayerUuid) -> bool {
        self.stopped.insert(uuid)
    }

    /// Re-arms every player. Returns how many were stopped.
    pub fn reset_all(&mut self) -> usize {
        let count = self.stopped.len();
        self.stopped.clear();
        count
    }

    pub fn stopped_count(&self) -> usize {
        self.stopped.len()
    }
}
