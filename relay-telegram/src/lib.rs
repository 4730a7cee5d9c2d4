//! # relay-telegram
//!
//! Telegram transport layer: teloxide-backed [`relay_core::RelayClient`] implementation,
//! update listener, and env + TOML configuration. The `tg-relay` binary wires these to
//! relay-engine. Handles only Telegram connectivity; routing and correlation logic live
//! in relay-engine.

pub mod adapters;
pub mod client;
pub mod config;
pub mod listener;

pub use client::TelegramRelayClient;
pub use config::{load_routing_rules, RelayConfig};
pub use listener::run_listener;
