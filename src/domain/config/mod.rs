//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_ENDPOINT, DEFAULT_USER_ID};
