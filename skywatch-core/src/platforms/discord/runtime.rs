use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::gateway::payload::incoming::{MessageCreate, Ready as ReadyPayload};
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_model::id::Id;

use skywatch_common::traits::Notifier;

use crate::Error;
use crate::services::IncomingMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// What the shard runner forwards to the bot's main loop.
#[derive(Debug, Clone)]
pub enum DiscordEvent {
    Ready { tag: String },
    Message(IncomingMessage),
}

fn user_tag(name: &str, discriminator: u16) -> String {
    // Accounts migrated to unique usernames report discriminator 0.
    if discriminator == 0 {
        name.to_string()
    } else {
        format!("{name}#{discriminator:04}")
    }
}

/// Reads gateway events for one shard and forwards READY and inbound chat
/// messages to `tx`. Messages authored by this bot are dropped here.
async fn shard_runner(mut shard: Shard, tx: UnboundedSender<DiscordEvent>) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    let mut own_id: Option<Id<UserMarker>> = None;

    while let Some(item) = shard
        .next_event(EventTypeFlags::READY | EventTypeFlags::MESSAGE_CREATE)
        .await
    {
        match item {
            Ok(Event::Ready(ready)) => {
                let data: &ReadyPayload = &ready;
                own_id = Some(data.user.id);
                let tag = user_tag(&data.user.name, data.user.discriminator);
                info!("Shard {shard_id} => READY as {tag} (ID={})", data.user.id);
                let _ = tx.send(DiscordEvent::Ready { tag });
            }
            Ok(Event::MessageCreate(msg_create)) => {
                let msg: &MessageCreate = &msg_create;
                if Some(msg.author.id) == own_id {
                    trace!("Ignoring own message in {}", msg.channel_id);
                    continue;
                }
                let _ = tx.send(DiscordEvent::Message(IncomingMessage {
                    channel_id: msg.channel_id.get(),
                    author_id: msg.author.id.get(),
                    author_is_bot: msg.author.bot,
                    text: msg.content.clone(),
                }));
            }
            Ok(other) => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
            }
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

fn channel_id(raw: u64) -> Result<Id<ChannelMarker>, Error> {
    Id::new_checked(raw).ok_or_else(|| Error::Platform(format!("Invalid channel ID: {raw}")))
}

fn user_id(raw: u64) -> Result<Id<UserMarker>, Error> {
    Id::new_checked(raw).ok_or_else(|| Error::Platform(format!("Invalid user ID: {raw}")))
}

/// Gateway session plus REST client for the bot account.
pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    rx: Mutex<Option<UnboundedReceiver<DiscordEvent>>>,

    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,

    http: Arc<HttpClient>,
}

impl DiscordPlatform {
    pub fn new(token: String) -> Self {
        let http = Arc::new(
            ClientBuilder::new()
                .token(token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            rx: Mutex::new(None),
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http,
        }
    }

    /// A cheap handle that only sends messages; usable before `connect`.
    pub fn notifier(&self) -> DiscordNotifier {
        DiscordNotifier {
            http: self.http.clone(),
        }
    }

    /// Waits for the next READY or chat message. `None` once disconnected.
    pub async fn next_event(&self) -> Option<DiscordEvent> {
        let mut guard = self.rx.lock().await;
        match guard.as_mut() {
            Some(r) => r.recv().await,
            None => None,
        }
    }

    pub async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        if self.token.is_empty() {
            return Err(Error::Config("Discord token is empty".into()));
        }

        let (tx, rx) = unbounded_channel::<DiscordEvent>();
        {
            let mut guard = self.rx.lock().await;
            *guard = Some(rx);
        }

        let config = Config::new(
            self.token.clone(),
            Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT,
        );

        let shards = gateway::create_recommended(&self.http, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?;

        for shard in shards {
            self.shard_senders.push(shard.sender());
            let tx_for_shard = tx.clone();
            let handle = tokio::spawn(async move {
                shard_runner(shard, tx_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    pub async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();

        {
            let mut guard = self.rx.lock().await;
            *guard = None;
        }
        debug!("(DiscordPlatform) Disconnected.");
        Ok(())
    }
}

/// Sends channel messages and direct messages through the REST API.
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<HttpClient>,
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send_to_channel(&self, channel: u64, text: &str) -> Result<(), Error> {
        self.http
            .create_message(channel_id(channel)?)
            .content(text)
            .await
            .map_err(|e| Error::Platform(format!("Error sending Discord message: {e:?}")))?;
        Ok(())
    }

    async fn send_to_user(&self, user: u64, text: &str) -> Result<(), Error> {
        let dm = self
            .http
            .create_private_channel(user_id(user)?)
            .await
            .map_err(|e| Error::Platform(format!("Error opening DM channel: {e:?}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing DM channel: {e:?}")))?;

        self.http
            .create_message(dm.id)
            .content(text)
            .await
            .map_err(|e| Error::Platform(format!("Error sending Discord DM: {e:?}")))?;
        Ok(())
    }
}
