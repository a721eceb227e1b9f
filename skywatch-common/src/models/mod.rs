pub mod notification;
pub mod player;
pub mod status;

pub use notification::{Notification, NotificationTarget};
pub use player::{PlayerUuid, TrackedPlayer};
pub use status::StatusPayload;
