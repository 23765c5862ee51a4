//! The seam towards the backend SDK: bulk queries used to seed a session and
//! fire-and-forget commands whose effect only shows up as later push events.

use serde::{Deserialize, Serialize};

use crate::handle::ForeignHandle;
use crate::models::{ChatListItem, ContactRecord};

pub trait ChatBackend {
    fn my_user_handle(&self) -> ForeignHandle;

    /// Returned items are borrowed from the backend; callers copy what they keep.
    fn active_chat_items(&self) -> &[ChatListItem];

    fn inactive_chat_items(&self) -> &[ChatListItem];

    fn archived_chat_items(&self) -> &[ChatListItem];

    fn contacts(&self) -> &[ContactRecord];

    fn close_chat_preview(&mut self, chat: ForeignHandle);
}

/// Backend stand-in that serves fixed bulk data and logs the commands it
/// receives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryBackend {
    pub my_user_handle: ForeignHandle,
    pub active_chats: Vec<ChatListItem>,
    pub inactive_chats: Vec<ChatListItem>,
    pub archived_chats: Vec<ChatListItem>,
    pub contacts: Vec<ContactRecord>,
    #[serde(skip)]
    pub closed_previews: Vec<ForeignHandle>,
}

impl MemoryBackend {
    pub fn new(my_user_handle: ForeignHandle) -> Self {
        Self {
            my_user_handle,
            ..Default::default()
        }
    }

    /// File a chat under the bulk query matching its flags.
    pub fn add_chat(&mut self, item: ChatListItem) {
        if item.archived {
            self.archived_chats.push(item);
        } else if item.active {
            self.active_chats.push(item);
        } else {
            self.inactive_chats.push(item);
        }
    }

    pub fn add_contact(&mut self, contact: ContactRecord) {
        self.contacts.push(contact);
    }
}

impl ChatBackend for MemoryBackend {
    fn my_user_handle(&self) -> ForeignHandle {
        self.my_user_handle
    }

    fn active_chat_items(&self) -> &[ChatListItem] {
        &self.active_chats
    }

    fn inactive_chat_items(&self) -> &[ChatListItem] {
        &self.inactive_chats
    }

    fn archived_chat_items(&self) -> &[ChatListItem] {
        &self.archived_chats
    }

    fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    fn close_chat_preview(&mut self, chat: ForeignHandle) {
        self.closed_previews.push(chat);
    }
}
