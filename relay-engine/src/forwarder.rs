//! New-message and edit handling: routing lookup, outbound calls, correlation upkeep.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use relay_core::{
    Event, Message, RelayClient, RelayError, Result, SendTextOptions,
};
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::correlation::{CorrelationKey, CorrelationStore};
use crate::routing::RoutingTable;

/// The forward-correlation engine. Owns the [`CorrelationStore`]; must only be
/// driven from a single task so store reads and writes stay ordered.
pub struct Forwarder {
    client: Arc<dyn RelayClient>,
    routes: RoutingTable,
    correlations: CorrelationStore,
    call_timeout: Duration,
}

impl Forwarder {
    pub fn new(client: Arc<dyn RelayClient>, routes: RoutingTable, call_timeout: Duration) -> Self {
        Self {
            client,
            routes,
            correlations: CorrelationStore::new(),
            call_timeout,
        }
    }

    /// Read access to the correlation table (inspection and tests).
    pub fn correlations(&self) -> &CorrelationStore {
        &self.correlations
    }

    /// Dispatches one classified event. Per-destination failures are logged and
    /// contained here; nothing propagates to the event loop.
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::NewMessage(message) => self.handle_new_message(&message).await,
            Event::MessageEdited {
                chat_id,
                message_id,
            } => self.handle_edited(chat_id, message_id).await,
            Event::Ignored(kind) => {
                debug!(update_kind = %kind, "Ignoring update");
            }
        }
    }

    /// Forwards a freshly observed message to every destination of every matching rule
    /// and records one correlation entry per successful forward.
    pub async fn handle_new_message(&mut self, src: &Message) {
        for rule in self.routes.matches(src.chat_id) {
            for &destination in &rule.destinations {
                match self.forward_to(destination, src).await {
                    Ok(destination_message) => {
                        self.correlations.put(
                            CorrelationKey {
                                source_chat: src.chat_id,
                                source_message: src.id,
                                destination_chat: destination,
                            },
                            destination_message,
                        );
                        info!(
                            chat_id = src.chat_id,
                            message_id = src.id,
                            destination,
                            destination_message,
                            "Forwarded message"
                        );
                    }
                    Err(e) => {
                        error!(
                            error = %e,
                            chat_id = src.chat_id,
                            message_id = src.id,
                            destination,
                            "Forward failed"
                        );
                    }
                }
            }
        }
    }

    /// Re-fetches an edited message and resends its text to every matching destination,
    /// threaded onto the previously recorded copy when one exists. Each successful
    /// resend re-points the correlation entry at the new copy.
    pub async fn handle_edited(&mut self, chat_id: i64, message_id: i64) {
        let src = match self
            .with_timeout("fetch", self.client.fetch_message(chat_id, message_id))
            .await
        {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, chat_id, message_id, "Fetch of edited message failed");
                return;
            }
        };

        let text = match src.content.forwardable_text() {
            Some(text) => text.to_string(),
            None => {
                info!(
                    chat_id = src.chat_id,
                    message_id = src.id,
                    content_kind = %src.content.kind(),
                    "Skipping edit with unsupported content"
                );
                return;
            }
        };

        for rule in self.routes.matches(src.chat_id) {
            for &destination in &rule.destinations {
                let key = CorrelationKey {
                    source_chat: src.chat_id,
                    source_message: src.id,
                    destination_chat: destination,
                };
                // Absent entry means the edit goes out unthreaded.
                let reply_to = self.correlations.get(&key);
                let options = SendTextOptions {
                    disable_link_preview: true,
                    clear_draft: true,
                    reply_to,
                };
                match self
                    .with_timeout("send", self.client.send_text(destination, &text, &options))
                    .await
                {
                    Ok(sent) => {
                        self.correlations.put(key, sent.id);
                        info!(
                            chat_id = src.chat_id,
                            message_id = src.id,
                            destination,
                            destination_message = sent.id,
                            reply_to = ?reply_to,
                            "Resent edited message"
                        );
                    }
                    Err(e) => {
                        error!(
                            error = %e,
                            chat_id = src.chat_id,
                            message_id = src.id,
                            destination,
                            "Resend of edited message failed"
                        );
                    }
                }
            }
        }
    }

    /// One forward call. The relay asks for exactly one copy; any other result
    /// count is a failure for this destination.
    async fn forward_to(&self, destination: i64, src: &Message) -> Result<i64> {
        let result = self
            .with_timeout(
                "forward",
                self.client.forward_message(destination, src.chat_id, src.id),
            )
            .await?;
        match result.message_ids.first() {
            Some(&id) if result.total_count == 1 && result.message_ids.len() == 1 => Ok(id),
            _ => Err(RelayError::Client(format!(
                "forward returned total_count {} with {} message ids, expected exactly 1",
                result.total_count,
                result.message_ids.len()
            ))),
        }
    }

    /// Bounds every outbound call so one unresponsive destination cannot stall
    /// the single consumer.
    async fn with_timeout<T>(
        &self,
        what: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout(what)),
        }
    }
}
