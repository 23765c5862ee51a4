use serde::{Deserialize, Serialize};

use super::changes::ChatChanges;
use super::privilege::Privilege;
use crate::constants::{DEFAULT_CHAT_TITLE, TOOLTIP_EXCERPT_CHARS};
use crate::handle::ForeignHandle;
use crate::snapshot::BackendObject;

/// One chat as the backend's chat list sees it at a single instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatListItem {
    pub chat_id: ForeignHandle,
    pub title: String,
    pub own_privilege: Privilege,
    pub unread_count: i32,
    /// Unix seconds of the last activity in the chat.
    pub last_timestamp: i64,
    pub last_message: String,
    pub last_message_sender: ForeignHandle,
    pub archived: bool,
    pub active: bool,
    pub preview: bool,
    pub group: bool,
    pub public: bool,
    pub num_previewers: u32,
    pub peer_count: u32,
}

impl ChatListItem {
    pub fn new(chat_id: ForeignHandle, title: impl Into<String>) -> Self {
        Self {
            chat_id,
            title: title.into(),
            active: true,
            own_privilege: Privilege::Standard,
            ..Default::default()
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_CHAT_TITLE
        } else {
            &self.title
        }
    }

    /// Tooltip text for the chat's row. `sender_name` resolves the last
    /// message's author when the caller already knows it.
    pub fn tooltip(&self, sender_name: Option<&str>) -> String {
        let kind = match (self.group, self.public) {
            (false, _) => "1on1",
            (true, false) => "private group",
            (true, true) => "public group",
        };
        let mut text = format!(
            "{} [{}]\nChat handle: {}\nOwn privilege: {}\nParticipants: {}",
            self.display_title(),
            kind,
            self.chat_id,
            self.own_privilege.label(),
            self.peer_count,
        );
        if self.preview {
            text.push_str(&format!("\nPreviewers: {}", self.num_previewers));
        }
        if !self.last_message.is_empty() {
            let excerpt: String = self.last_message.chars().take(TOOLTIP_EXCERPT_CHARS).collect();
            let sender = match sender_name {
                Some(name) => name.to_string(),
                None => self.last_message_sender.to_string(),
            };
            text.push_str(&format!("\nLast message ({}): {}", sender, excerpt));
        }
        text
    }

    /// Flags for every field that differs from `older`.
    pub fn changes_since(&self, older: &ChatListItem) -> ChatChanges {
        let mut changes = ChatChanges::NONE;
        if self.title != older.title {
            changes |= ChatChanges::TITLE;
        }
        if self.own_privilege != older.own_privilege {
            changes |= ChatChanges::OWN_PRIV;
        }
        if self.unread_count != older.unread_count {
            changes |= ChatChanges::UNREAD_COUNT;
        }
        // Joining a previewed chat or becoming a group changes who takes part.
        if self.peer_count != older.peer_count || self.preview != older.preview || self.group != older.group {
            changes |= ChatChanges::PARTICIPANTS;
        }
        if self.active != older.active {
            changes |= ChatChanges::CLOSED;
        }
        if self.last_message != older.last_message || self.last_message_sender != older.last_message_sender {
            changes |= ChatChanges::LAST_MSG;
        }
        if self.last_timestamp != older.last_timestamp {
            changes |= ChatChanges::LAST_TS;
        }
        if self.archived != older.archived {
            changes |= ChatChanges::ARCHIVE;
        }
        if self.public != older.public {
            changes |= ChatChanges::CHAT_MODE;
        }
        if self.num_previewers != older.num_previewers {
            changes |= ChatChanges::UPDATE_PREVIEWERS;
        }
        changes
    }
}

impl BackendObject for ChatListItem {
    const ENTITY: &'static str = "chat list item";

    fn handle(&self) -> ForeignHandle {
        self.chat_id
    }
}
