//! Shared constants
//!
//! Raw values mirror the backend SDK's integer codes so that snapshots
//! decoded from the wire keep their meaning.

/// Raw value reserved by the backend for "no handle".
pub const INVALID_HANDLE_RAW: u64 = u64::MAX;

// List status labels
pub const LABEL_ALL_CHATS: &str = "Showing <all> chatrooms";
pub const LABEL_UNARCHIVED_CHATS: &str = "Showing <active+inactive> chatrooms";
pub const LABEL_CONTACTS: &str = "Showing <active> contacts";

/// Chat title used when the backend hands over an empty one.
pub const DEFAULT_CHAT_TITLE: &str = "Untitled chat";

/// Longest last-message excerpt carried in a row tooltip.
pub const TOOLTIP_EXCERPT_CHARS: usize = 60;

// Backend presence codes, the one field still pushed as a raw integer
pub mod codes {
    pub const STATUS_OFFLINE: i32 = 1;
    pub const STATUS_AWAY: i32 = 2;
    pub const STATUS_ONLINE: i32 = 3;
    pub const STATUS_BUSY: i32 = 4;
    pub const STATUS_INVALID: i32 = 15;
}
