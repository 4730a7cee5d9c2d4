//! # relay-core
//!
//! Core types and traits for the forwarding relay: [`RelayClient`], message and event types,
//! the error taxonomy, and tracing initialization. Transport-agnostic; used by relay-engine
//! and relay-telegram.

pub mod client;
pub mod error;
pub mod logger;
pub mod types;

pub use client::{ForwardResult, RelayClient, SendTextOptions, SentMessage};
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{Event, Message, MessageContent};
