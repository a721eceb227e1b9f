pub mod command_service;
pub mod status_interpreter;
pub mod status_monitor;

pub use command_service::{ChatCommand, CommandOutcome, CommandService, IncomingMessage};
pub use status_interpreter::{Interpretation, StatusInterpreter};
pub use status_monitor::{CycleReport, NotificationRoutes, SharedStatusMonitor, StatusMonitor};
