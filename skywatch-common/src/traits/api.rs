use async_trait::async_trait;

use crate::error::Error;
use crate::models::{PlayerUuid, StatusPayload};

/// Upstream player status lookup.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Queries the status of a single player. `Err` means the request never
    /// produced a decodable body (network failure, non-JSON, missing session).
    async fn fetch_status(&self, uuid: &PlayerUuid) -> Result<StatusPayload, Error>;
}

/// Outbound chat messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<(), Error>;
    async fn send_to_user(&self, user_id: u64, text: &str) -> Result<(), Error>;
}
