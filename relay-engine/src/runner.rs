//! Single-consumer event loop.
//!
//! Exactly one task runs [`run_loop`]; it owns the [`Forwarder`] and processes
//! events strictly in arrival order. The correlation store is read and written
//! inside one event's handling with no lock, which is only safe because of this
//! single-consumer discipline. Shutdown is observed between events, so an event
//! in flight always finishes before the loop exits.

use relay_core::Event;
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument};

use crate::forwarder::Forwarder;

/// Consumes classified events until the channel closes or the shutdown flag flips.
#[instrument(skip(forwarder, events, shutdown))]
pub async fn run_loop(
    forwarder: &mut Forwarder,
    mut events: mpsc::Receiver<Event>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Event loop started");
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Shutdown requested, stopping event intake");
                break;
            }
            maybe_event = events.recv() => match maybe_event {
                Some(event) => forwarder.handle_event(event).await,
                None => {
                    info!("Event stream closed");
                    break;
                }
            }
        }
    }
    info!("Event loop stopped");
}
