/// Where a notification goes. Concrete channel and user ids are resolved by
/// the poll cycle from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTarget {
    /// General alert channel; messages here mention the administrator.
    AlertChannel,
    /// Status log channel.
    StatusChannel,
    /// Direct message to the administrator.
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: NotificationTarget,
    pub text: String,
}

impl Notification {
    pub fn new(target: NotificationTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
        }
    }
}
