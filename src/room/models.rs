use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_ROOM_NAME: &str = "Untitled Room";

/// A chat room as stored in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomModel {
    pub id: String, // UUID v4, or whatever id a client joined with
    pub name: String,
    pub is_public: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Derived from the connection registry; rewritten on every membership change
    pub member_count: usize,
}

impl RoomModel {
    /// Creates a new empty room with a generated ID
    pub fn new(name: String, is_public: bool) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, is_public)
    }

    /// Creates a new empty room under a caller-chosen ID
    pub fn with_id(id: String, name: String, is_public: bool) -> Self {
        Self {
            id,
            name,
            is_public,
            // Millisecond precision, the same as the wire format
            created_at: Utc::now().trunc_subsecs(3),
            member_count: 0,
        }
    }

    /// A room materialized because a client joined an id nobody created
    pub fn placeholder(id: &str) -> Self {
        Self::with_id(id.to_string(), DEFAULT_ROOM_NAME.to_string(), false)
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            member_count: self.member_count,
        }
    }
}

/// Listing entry for public room discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub member_count: usize,
}
