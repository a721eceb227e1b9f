pub mod api;

pub use api::{Notifier, StatusApi};
