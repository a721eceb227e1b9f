use std::fmt;

/// Minecraft player UUID as the Hypixel API expects it. Treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerUuid(String);

impl PlayerUuid {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerUuid {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PlayerUuid {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A watched player together with the name used in chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlayer {
    pub uuid: PlayerUuid,
    pub display_name: String,
}

impl TrackedPlayer {
    pub fn new(uuid: impl Into<PlayerUuid>, display_name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            display_name: display_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_is_kept_verbatim() {
        let player = TrackedPlayer::new("a1b2-c3", "Justtokyo");
        assert_eq!(player.uuid, PlayerUuid::from(String::from("a1b2-c3")));
        assert_eq!(player.uuid.to_string(), "a1b2-c3");
        assert_eq!(player.display_name, "Justtokyo");
    }
}
