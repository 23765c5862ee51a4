use serde::{Deserialize, Serialize};

use crate::constants::codes;

/// Per-chat connection state pushed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    Offline,
    InProgress,
    Logging,
    Online,
}

/// User presence as shown by the online indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresenceStatus {
    Offline,
    Away,
    Online,
    Busy,
}

impl PresenceStatus {
    /// Maps a raw backend status. The backend's "invalid" status (sent while
    /// our own presence is not yet known) and unknown codes read as offline.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            codes::STATUS_AWAY => Self::Away,
            codes::STATUS_ONLINE => Self::Online,
            codes::STATUS_BUSY => Self::Busy,
            _ => Self::Offline,
        }
    }
}
