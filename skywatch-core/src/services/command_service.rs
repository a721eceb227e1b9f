// File: src/services/command_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use skywatch_common::traits::Notifier;

use crate::Error;
use crate::services::status_monitor::{CycleReport, SharedStatusMonitor};

pub const RESET_REPLY: &str = "The status monitoring has been reset for all users.";
pub const TEST_REPLY: &str = "Checking the status of all users...";

/// A chat message as seen by the command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel_id: u64,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// `!reset`: re-arm every stopped player.
    Reset,
    /// `!test`: run a poll cycle right now.
    Test,
}

impl ChatCommand {
    /// Case-insensitive exact match on the whole message.
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "!reset" => Some(ChatCommand::Reset),
            "!test" => Some(ChatCommand::Test),
            _ => None,
        }
    }
}

/// What a handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Reset { rearmed: usize },
    Tested(CycleReport),
}

/// Handles `!reset` and `!test` typed in any channel the bot can read.
pub struct CommandService {
    monitor: SharedStatusMonitor,
    notifier: Arc<dyn Notifier>,
}

impl CommandService {
    pub fn new(monitor: SharedStatusMonitor, notifier: Arc<dyn Notifier>) -> Self {
        Self { monitor, notifier }
    }

    /// Returns `Ok(None)` for bot-authored messages and anything that is not a
    /// command.
    pub async fn handle_message(&self, msg: &IncomingMessage) -> Result<Option<CommandOutcome>, Error> {
        if msg.author_is_bot {
            debug!("Ignoring bot message from {}", msg.author_id);
            return Ok(None);
        }

        let Some(command) = ChatCommand::parse(&msg.text) else {
            return Ok(None);
        };
        info!("Command {:?} from user {} in channel {}", command, msg.author_id, msg.channel_id);

        match command {
            ChatCommand::Reset => {
                let rearmed = self.monitor.lock().await.reset_all();
                self.notifier.send_to_channel(msg.channel_id, RESET_REPLY).await?;
                Ok(Some(CommandOutcome::Reset { rearmed }))
            }
            ChatCommand::Test => {
                self.notifier.send_to_channel(msg.channel_id, TEST_REPLY).await?;
                let report = self.monitor.lock().await.run_once(Utc::now()).await;
                Ok(Some(CommandOutcome::Tested(report)))
            }
        }
    }
}
