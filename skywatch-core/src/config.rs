// File: src/config.rs

use tracing::{debug, info};

use skywatch_common::models::TrackedPlayer;

use crate::Error;
use crate::keepalive::DEFAULT_KEEPALIVE_PORT;
use crate::platforms::hypixel::DEFAULT_API_BASE;
use crate::services::NotificationRoutes;

/// Names used for the first three tracked UUIDs when `DISPLAY_NAMES` is unset.
pub const DEFAULT_DISPLAY_NAMES: [&str; 3] = ["YMCAJason1910", "Justtokyo", "OompaLoompaman69"];

/// Everything the bot needs at startup, read once from the environment.
#[derive(Clone)]
pub struct BotConfig {
    pub hypixel_api_key: String,
    pub hypixel_api_base: String,
    pub bot_token: String,
    pub players: Vec<TrackedPlayer>,
    pub routes: NotificationRoutes,
    pub keepalive_port: u16,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("hypixel_api_key", &"<redacted>")
            .field("hypixel_api_base", &self.hypixel_api_base)
            .field("bot_token", &"<redacted>")
            .field("players", &self.players)
            .field("routes", &self.routes)
            .field("keepalive_port", &self.keepalive_port)
            .finish()
    }
}

impl BotConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        match dotenv::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| Error::Config(format!("missing required env var: {key}")));
        let either = |primary: &str, alias: &str| {
            get(primary)
                .or_else(|| get(alias))
                .ok_or_else(|| Error::Config(format!("missing required env var: {primary}")))
        };

        let hypixel_api_key = require("HYPIXEL_API_KEY")?;
        let bot_token = require("BOT_TOKEN")?;
        let hypixel_api_base = get("HYPIXEL_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let uuids: Vec<String> = match get("TRACKED_UUIDS") {
            Some(list) => split_list(&list),
            None => vec![require("UUID1")?, require("UUID2")?, require("UUID3")?],
        };
        if uuids.is_empty() {
            return Err(Error::Config("TRACKED_UUIDS is empty".into()));
        }

        let names: Vec<String> = match get("DISPLAY_NAMES") {
            Some(list) => split_list(&list),
            None => DEFAULT_DISPLAY_NAMES.iter().map(|n| n.to_string()).collect(),
        };
        let players = pair_players(uuids, names)?;

        let routes = NotificationRoutes {
            admin_user_id: parse_snowflake("USER_ID", &require("USER_ID")?)?,
            alert_channel_id: parse_snowflake("CHANNEL_ID", &either("CHANNEL_ID", "Channel_ID")?)?,
            status_channel_id: parse_snowflake("CHANNEL_ID2", &either("CHANNEL_ID2", "Channel_ID2")?)?,
        };

        let keepalive_port = match get("KEEPALIVE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("KEEPALIVE_PORT '{raw}': {e}")))?,
            None => DEFAULT_KEEPALIVE_PORT,
        };

        Ok(Self {
            hypixel_api_key,
            hypixel_api_base,
            bot_token,
            players,
            routes,
            keepalive_port,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn pair_players(uuids: Vec<String>, names: Vec<String>) -> Result<Vec<TrackedPlayer>, Error> {
    if names.len() < uuids.len() {
        return Err(Error::Config(format!(
            "{} tracked UUID(s) but only {} display name(s)",
            uuids.len(),
            names.len()
        )));
    }
    let mut players: Vec<TrackedPlayer> = Vec::with_capacity(uuids.len());
    for (uuid, name) in uuids.into_iter().zip(names) {
        if players.iter().any(|p| p.uuid.as_str() == uuid) {
            return Err(Error::Config(format!("UUID {uuid} is listed twice")));
        }
        players.push(TrackedPlayer::new(uuid, name));
    }
    Ok(players)
}

/// Discord ids are non-zero u64 snowflakes.
fn parse_snowflake(key: &str, raw: &str) -> Result<u64, Error> {
    match raw.parse::<u64>() {
        Ok(0) => Err(Error::Config(format!("{key} must not be 0"))),
        Ok(id) => Ok(id),
        Err(e) => Err(Error::Config(format!("{key} '{raw}' is not a Discord id: {e}"))),
    }
}
