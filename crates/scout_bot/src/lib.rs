//! Telegram front end for the vacancy scout.
pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
pub mod poller;
pub mod telegram;
pub mod transport;

pub use config::{BotConfig, ConfigError};
pub use effects::{Bot, EffectRunner};
pub use poller::Poller;
pub use telegram::{TelegramClient, TelegramError};
pub use transport::ChatTransport;
