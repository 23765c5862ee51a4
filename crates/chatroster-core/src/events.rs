use serde::{Deserialize, Serialize};

use crate::handle::ForeignHandle;
use crate::models::{ChatChanges, ChatListItem, ConnectionState, ContactChanges, ContactRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Every field of the snapshot is authoritative.
    FullReplace,
    /// Only the flagged fields changed.
    FieldChange,
}

/// Chat-list change notification. `snapshot` is `None` when the backend
/// failed to hand over the item; applying such an event is an error.
#[derive(Debug, Clone)]
pub struct ChatListEvent {
    pub kind: UpdateKind,
    pub handle: ForeignHandle,
    pub changes: ChatChanges,
    pub snapshot: Option<Box<ChatListItem>>,
}

impl ChatListEvent {
    pub fn full_replace(item: ChatListItem) -> Self {
        Self {
            kind: UpdateKind::FullReplace,
            handle: item.chat_id,
            changes: ChatChanges::NONE,
            snapshot: Some(Box::new(item)),
        }
    }

    pub fn field_change(item: ChatListItem, changes: ChatChanges) -> Self {
        Self {
            kind: UpdateKind::FieldChange,
            handle: item.chat_id,
            changes,
            snapshot: Some(Box::new(item)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactEvent {
    pub handle: ForeignHandle,
    pub changes: ContactChanges,
    pub snapshot: Option<Box<ContactRecord>>,
}

impl ContactEvent {
    pub fn new(record: ContactRecord, changes: ContactChanges) -> Self {
        Self {
            handle: record.handle,
            changes,
            snapshot: Some(Box::new(record)),
        }
    }
}

/// Backend initialisation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InitState {
    Waiting,
    OfflineSession,
    OnlineSession,
    Anonymous,
    Error,
    Terminated,
}

/// Every push notification the engine reacts to.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    ChatListItem(ChatListEvent),
    ChatRemoved {
        chat: ForeignHandle,
    },
    /// `chat == INVALID` with `Online` means every chat is connected.
    ChatConnectionState {
        chat: ForeignHandle,
        state: ConnectionState,
    },
    OnlineStatus {
        user: ForeignHandle,
        status: i32,
        in_progress: bool,
    },
    Contact(ContactEvent),
    ContactRemoved {
        user: ForeignHandle,
    },
    FirstNameUpdated {
        user: ForeignHandle,
        first_name: String,
    },
    InitState(InitState),
}

impl SessionEvent {
    /// The gating signal: all chats reached the connected state.
    pub fn all_chats_connected() -> Self {
        Self::ChatConnectionState {
            chat: ForeignHandle::INVALID,
            state: ConnectionState::Online,
        }
    }
}
