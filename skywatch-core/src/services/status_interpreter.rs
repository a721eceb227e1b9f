// File: src/services/status_interpreter.rs

use skywatch_common::models::status::{INVALID_API_KEY_CAUSE, SKYBLOCK_GAME_TYPE};
use skywatch_common::models::{Notification, NotificationTarget, PlayerUuid, StatusPayload};

pub const EXPIRED_KEY_WARNING: &str =
    "⚠️ Your Hypixel API key has expired or is invalid! Please update it.";

/// What to say about one status response, and whether to stop watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub subject: PlayerUuid,
    /// Name of the rule that produced this outcome.
    pub rule: &'static str,
    pub notifications: Vec<Notification>,
    pub stop: bool,
}

struct Rule {
    name: &'static str,
    applies: fn(&StatusPayload) -> bool,
    outcome: fn(&StatusInterpreter, &StatusPayload, &str) -> (Vec<Notification>, bool),
}

/// Evaluated top to bottom; the first rule that applies wins.
const RULES: &[Rule] = &[
    Rule {
        name: "invalid_api_key",
        applies: |p| matches!(p, StatusPayload::Failure { cause: Some(c) } if c == INVALID_API_KEY_CAUSE),
        outcome: |_, _, _| {
            (
                vec![Notification::new(NotificationTarget::Admin, EXPIRED_KEY_WARNING)],
                false,
            )
        },
    },
    Rule {
        name: "upstream_failure",
        applies: |p| matches!(p, StatusPayload::Failure { .. }),
        outcome: |_, _, _| (Vec::new(), false),
    },
    Rule {
        name: "playing_skyblock",
        applies: |p| {
            matches!(p, StatusPayload::Success { online: true, game_type: Some(g) } if g == SKYBLOCK_GAME_TYPE)
        },
        outcome: |_, _, name| {
            (
                vec![Notification::new(
                    NotificationTarget::StatusChannel,
                    format!("{name} is playing Skyblock!"),
                )],
                false,
            )
        },
    },
    Rule {
        name: "not_playing_skyblock",
        applies: |p| matches!(p, StatusPayload::Success { online: true, .. }),
        outcome: |interp, payload, name| {
            let game = match payload {
                StatusPayload::Success { game_type: Some(g), .. } => g.as_str(),
                _ => "an unknown game",
            };
            let line = format!("{name} is **NOT** playing Skyblock! Currently playing {game}.");
            (interp.alert_and_log(&line), true)
        },
    },
    Rule {
        name: "offline",
        applies: |p| matches!(p, StatusPayload::Success { online: false, .. }),
        outcome: |interp, _, name| {
            let line = format!("{name} is currently offline.");
            (interp.alert_and_log(&line), true)
        },
    },
];

/// Maps a status response to chat notifications. Holds nothing but the
/// administrator id used for alert mentions, so `interpret` is pure.
#[derive(Debug, Clone)]
pub struct StatusInterpreter {
    admin_user_id: u64,
}

impl StatusInterpreter {
    pub fn new(admin_user_id: u64) -> Self {
        Self { admin_user_id }
    }

    pub fn interpret(
        &self,
        payload: &StatusPayload,
        display_name: &str,
        uuid: &PlayerUuid,
    ) -> Interpretation {
        for rule in RULES {
            if (rule.applies)(payload) {
                let (notifications, stop) = (rule.outcome)(self, payload, display_name);
                return Interpretation {
                    subject: uuid.clone(),
                    rule: rule.name,
                    notifications,
                    stop,
                };
            }
        }
        // The rule list covers every variant; kept for exhaustiveness.
        Interpretation {
            subject: uuid.clone(),
            rule: "unmatched",
            notifications: Vec::new(),
            stop: false,
        }
    }

    fn alert_and_log(&self, line: &str) -> Vec<Notification> {
        vec![
            Notification::new(
                NotificationTarget::AlertChannel,
                format!("<@{}> {line}", self.admin_user_id),
            ),
            Notification::new(NotificationTarget::StatusChannel, line.to_string()),
        ]
    }
}
