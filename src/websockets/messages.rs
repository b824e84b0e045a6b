use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::room::models::RoomModel;

/// Client -> Server events
///
/// Frames look like `{"type": "join-room", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(JoinRoomPayload),
    ChatMessage(ChatPayload),
}

/// Server -> Client events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerEvent {
    SystemMessage(SystemMessagePayload),
    RoomMeta(RoomModel),
    ChatMessage(ChatMessagePayload),
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: Option<String>,
}

/// Accepts `"42"` and `42` alike; any other JSON type reads as absent
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatPayload {
    #[serde(default)]
    pub text: String,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessagePayload {
    pub text: String,
    pub member_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessagePayload {
    pub id: String,
    pub username: String,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
}

/// Helper functions for creating messages
impl ServerEvent {
    /// System message announcing someone arrived
    pub fn joined(username: &str, member_count: usize) -> Self {
        Self::SystemMessage(SystemMessagePayload {
            text: format!("{username} joined the room."),
            member_count,
        })
    }

    /// System message announcing someone went away
    pub fn left(username: &str, member_count: usize) -> Self {
        Self::SystemMessage(SystemMessagePayload {
            text: format!("{username} left the room."),
            member_count,
        })
    }

    /// Chat message with a fresh id, stamped now
    pub fn chat(username: String, text: String) -> Self {
        Self::ChatMessage(ChatMessagePayload {
            id: Uuid::new_v4().to_string(),
            username,
            text,
            ts: Utc::now(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::SystemMessage(_) => "system-message",
            ServerEvent::RoomMeta(_) => "room-meta",
            ServerEvent::ChatMessage(_) => "chat-message",
        }
    }
}
