pub mod runtime;

pub use runtime::{ConnectionStatus, DiscordEvent, DiscordNotifier, DiscordPlatform};
