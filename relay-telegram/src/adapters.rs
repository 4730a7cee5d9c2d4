//! Adapters from Telegram (teloxide) types to relay-core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{Event, Message, MessageContent};
use teloxide::types::{MediaKind, MessageKind, Update, UpdateKind};

/// Converts a teloxide message to the relay's [`Message`].
pub fn message_to_core(msg: &teloxide::types::Message) -> Message {
    Message {
        chat_id: msg.chat.id.0,
        id: msg.id.0 as i64,
        content: content_of(msg),
    }
}

/// Classifies one raw update into exactly one [`Event`] arm.
/// Channel posts count as new messages; edited channel posts as edits.
pub fn event_from_update(update: &Update) -> Event {
    match &update.kind {
        UpdateKind::Message(msg) | UpdateKind::ChannelPost(msg) => {
            Event::NewMessage(message_to_core(msg))
        }
        UpdateKind::EditedMessage(msg) | UpdateKind::EditedChannelPost(msg) => {
            Event::MessageEdited {
                chat_id: msg.chat.id.0,
                message_id: msg.id.0 as i64,
            }
        }
        other => Event::Ignored(update_kind_name(other).to_string()),
    }
}

fn content_of(msg: &teloxide::types::Message) -> MessageContent {
    if let Some(text) = msg.text() {
        MessageContent::Text(text.to_string())
    } else if let Some(caption) = msg.caption() {
        MessageContent::Caption(caption.to_string())
    } else {
        MessageContent::Unsupported(content_kind(msg).to_string())
    }
}

/// Content kind name for logging unsupported messages.
fn content_kind(msg: &teloxide::types::Message) -> &'static str {
    match &msg.kind {
        MessageKind::Common(common) => match &common.media_kind {
            MediaKind::Animation(_) => "animation",
            MediaKind::Audio(_) => "audio",
            MediaKind::Contact(_) => "contact",
            MediaKind::Document(_) => "document",
            MediaKind::Game(_) => "game",
            MediaKind::Location(_) => "location",
            MediaKind::Photo(_) => "photo",
            MediaKind::Poll(_) => "poll",
            MediaKind::Sticker(_) => "sticker",
            MediaKind::Venue(_) => "venue",
            MediaKind::Video(_) => "video",
            MediaKind::VideoNote(_) => "video_note",
            MediaKind::Voice(_) => "voice",
            MediaKind::Text(_) => "text",
            _ => "other",
        },
        _ => "service",
    }
}

fn update_kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::CallbackQuery(_) => "callback_query",
        UpdateKind::InlineQuery(_) => "inline_query",
        UpdateKind::Poll(_) => "poll",
        UpdateKind::PollAnswer(_) => "poll_answer",
        UpdateKind::MyChatMember(_) => "my_chat_member",
        UpdateKind::ChatMember(_) => "chat_member",
        UpdateKind::ChatJoinRequest(_) => "chat_join_request",
        UpdateKind::Error(_) => "error",
        _ => "other",
    }
}
