use clap::Parser;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use skywatch_common::traits::{Notifier, StatusApi};
use skywatch_core::config::BotConfig;
use skywatch_core::keepalive::start_keepalive_server;
use skywatch_core::platforms::discord::{DiscordEvent, DiscordPlatform};
use skywatch_core::platforms::hypixel::HypixelClient;
use skywatch_core::services::{CommandService, StatusMonitor};
use skywatch_core::tasks::status_poll::{spawn_status_poll_task, POLL_INTERVAL};

#[derive(Parser, Debug, Clone)]
#[command(name = "skywatch")]
#[command(author, version, about = "SkyWatch - Hypixel Skyblock status notifier for Discord")]
struct Args {
    /// Port for the keep-alive HTTP endpoint (overrides KEEPALIVE_PORT)
    #[arg(long)]
    keepalive_port: Option<u16>,

    /// Do not start the keep-alive HTTP endpoint
    #[arg(long, default_value = "false")]
    no_keepalive: bool,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("skywatch=info".parse().unwrap_or_default())
        .add_directive("skywatch_core=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = BotConfig::from_env()?;
    info!(
        "SkyWatch starting. players={}, keepalive={}",
        config.players.len(),
        !args.no_keepalive
    );

    let _keepalive = if args.no_keepalive {
        None
    } else {
        let port = args.keepalive_port.unwrap_or(config.keepalive_port);
        Some(start_keepalive_server(port).await?)
    };

    let mut discord = DiscordPlatform::new(config.bot_token.clone());
    let notifier: Arc<dyn Notifier> = Arc::new(discord.notifier());
    let api: Arc<dyn StatusApi> = Arc::new(HypixelClient::new(
        config.hypixel_api_key.clone(),
        &config.hypixel_api_base,
    )?);

    let monitor = StatusMonitor::new(config.players.clone(), config.routes, api, notifier.clone())
        .into_shared();
    let commands = Arc::new(CommandService::new(monitor.clone(), notifier));

    discord.connect().await?;

    let mut poll_task: Option<JoinHandle<()>> = None;
    loop {
        tokio::select! {
            event = discord.next_event() => {
                let Some(event) = event else {
                    warn!("Discord event stream closed.");
                    break;
                };
                match event {
                    DiscordEvent::Ready { tag } => {
                        info!("Logged in as {}!", tag);
                        // READY repeats after a session is re-established.
                        if poll_task.is_none() {
                            poll_task = Some(spawn_status_poll_task(monitor.clone(), POLL_INTERVAL));
                        }
                    }
                    DiscordEvent::Message(msg) => {
                        let commands = commands.clone();
                        tokio::spawn(async move {
                            if let Err(e) = commands.handle_message(&msg).await {
                                error!("Command handling failed: {}", e);
                            }
                        });
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down.");
                break;
            }
        }
    }

    if let Some(task) = poll_task {
        task.abort();
    }
    if let Err(e) = discord.disconnect().await {
        error!("Error during Discord disconnect: {}", e);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}
