//! Update listener: long-polls Telegram and feeds classified events to the engine's channel.

use std::sync::Arc;

use futures::{pin_mut, StreamExt};
use relay_core::Event;
use teloxide::types::UpdateKind;
use teloxide::update_listeners::{polling_default, AsUpdateStream};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::adapters::{event_from_update, message_to_core};
use crate::client::TelegramRelayClient;

/// Reads the polling update stream until it ends or the consumer side is dropped.
/// Edited-message bodies are remembered on the client before their event is emitted,
/// so the engine's re-fetch can be served.
#[instrument(skip(bot, client, events))]
pub async fn run_listener(
    bot: teloxide::Bot,
    client: Arc<TelegramRelayClient>,
    events: mpsc::Sender<Event>,
) {
    let mut listener = polling_default(bot).await;
    let stream = listener.as_stream();
    pin_mut!(stream);

    info!("Update listener started");
    while let Some(next) = stream.next().await {
        let update = match next {
            Ok(update) => update,
            Err(e) => {
                warn!(error = %e, "Update stream error");
                continue;
            }
        };

        if let UpdateKind::EditedMessage(message) | UpdateKind::EditedChannelPost(message) =
            &update.kind
        {
            client.remember(message_to_core(message));
        }

        if events.send(event_from_update(&update)).await.is_err() {
            // Consumer is gone; intake stops here.
            break;
        }
    }
    info!("Update listener stopped");
}
