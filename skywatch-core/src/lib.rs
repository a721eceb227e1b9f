// src/lib.rs

pub mod cache;
pub mod config;
pub mod http;
pub mod keepalive;
pub mod platforms;
pub mod services;
pub mod tasks;

pub use skywatch_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient};
