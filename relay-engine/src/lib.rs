//! # relay-engine
//!
//! The forward-correlation engine: [`RoutingTable`] decides where a message goes,
//! [`CorrelationStore`] links each original to its forwarded copies, [`Forwarder`]
//! handles new and edited messages, and [`run_loop`] drives everything from a
//! single-consumer event channel.

pub mod correlation;
pub mod forwarder;
pub mod routing;
pub mod runner;

pub use correlation::{CorrelationKey, CorrelationStore};
pub use forwarder::Forwarder;
pub use routing::{RoutingRule, RoutingTable};
pub use runner::run_loop;
