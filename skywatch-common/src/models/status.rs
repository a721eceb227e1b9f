// File: skywatch-common/src/models/status.rs

use serde::Deserialize;

use crate::error::Error;

/// `cause` string Hypixel returns when the key is missing, revoked or expired.
pub const INVALID_API_KEY_CAUSE: &str = "Invalid API key";

/// Hypixel `gameType` for Skyblock.
pub const SKYBLOCK_GAME_TYPE: &str = "SKYBLOCK";

/// Decoded body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusPayload {
    Success {
        online: bool,
        game_type: Option<String>,
    },
    Failure {
        cause: Option<String>,
    },
}

/// Wire shape. Only the fields we act on are declared.
#[derive(Debug, Deserialize)]
struct RawStatusResponse {
    success: bool,
    #[serde(default)]
    session: Option<RawSession>,
    #[serde(default)]
    cause: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    online: bool,
    #[serde(default)]
    game_type: Option<String>,
}

impl StatusPayload {
    /// Parses a raw response body. A body that is not JSON, or a successful
    /// response without a `session` object, is an error.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let raw: RawStatusResponse = serde_json::from_str(body)?;
        if !raw.success {
            return Ok(StatusPayload::Failure { cause: raw.cause });
        }
        let session = raw
            .session
            .ok_or_else(|| Error::Parse("status response has success=true but no session".into()))?;
        Ok(StatusPayload::Success {
            online: session.online,
            game_type: session.game_type,
        })
    }

    pub fn online(game_type: impl Into<String>) -> Self {
        StatusPayload::Success {
            online: true,
            game_type: Some(game_type.into()),
        }
    }

    pub fn offline() -> Self {
        StatusPayload::Success {
            online: false,
            game_type: None,
        }
    }

    pub fn failure(cause: impl Into<String>) -> Self {
        StatusPayload::Failure {
            cause: Some(cause.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusPayload::Success { .. })
    }

    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, StatusPayload::Failure { cause: Some(c) } if c == INVALID_API_KEY_CAUSE)
    }
}
