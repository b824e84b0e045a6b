use serde::Deserialize;

use super::models::DEFAULT_ROOM_NAME;

/// Request payload for creating a new room
///
/// Both fields are optional; missing ones fall back to an untitled public room.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreateRequest {
    pub name: Option<String>,
    pub is_public: Option<bool>,
}

impl RoomCreateRequest {
    pub fn name_or_default(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string())
    }

    pub fn is_public_or_default(&self) -> bool {
        self.is_public.unwrap_or(true)
    }
}
