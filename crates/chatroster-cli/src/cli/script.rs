//! Replay scripts: a backend fixture plus the push notifications and user
//! actions to feed the engine, in order.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chatroster_core::{
    ChatChanges, ChatListEvent, ChatListItem, ConnectionState, ContactChanges, ContactEvent, ContactRecord,
    CoreConfig, ForeignHandle, InitState, MemoryBackend, SessionEvent, UpdateKind, WindowId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Script {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CoreConfig>,
    pub backend: MemoryBackend,
    pub events: Vec<ScriptStep>,
}

/// One script entry. Omitting `changes` on `chatItem` makes it a full
/// replace; omitting `item`/`record` models a backend that handed over no
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScriptStep {
    ChatItem {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        handle: Option<ForeignHandle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item: Option<ChatListItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        changes: Option<Vec<String>>,
    },
    ChatRemoved {
        chat: ForeignHandle,
    },
    Connection {
        #[serde(default)]
        chat: ForeignHandle,
        state: ConnectionState,
    },
    AllChatsConnected,
    OnlineStatus {
        user: ForeignHandle,
        status: i32,
        #[serde(default)]
        in_progress: bool,
    },
    Contact {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        handle: Option<ForeignHandle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        record: Option<ContactRecord>,
        #[serde(default)]
        changes: Vec<String>,
    },
    ContactRemoved {
        user: ForeignHandle,
    },
    FirstName {
        user: ForeignHandle,
        first_name: String,
    },
    InitState {
        state: InitState,
    },
    ShowWindow {
        chat: ForeignHandle,
        window: u64,
    },
    ClosePreview {
        chat: ForeignHandle,
    },
    ToggleArchived,
    SetArchivedVisible {
        visible: bool,
    },
    Flush,
}

/// A step turned into what the engine consumes.
#[derive(Debug)]
pub enum Action {
    Session(SessionEvent),
    ShowWindow { chat: ForeignHandle, window: WindowId },
    ClosePreview { chat: ForeignHandle },
    ToggleArchived,
    SetArchivedVisible(bool),
    Flush,
}

fn parse_changes<F>(names: &[String], from_name: impl Fn(&str) -> Option<F>) -> Result<F>
where
    F: Default + std::ops::BitOrAssign,
{
    let mut flags = F::default();
    for name in names {
        match from_name(name) {
            Some(flag) => flags |= flag,
            None => bail!("Unknown change flag: {}", name),
        }
    }
    Ok(flags)
}

/// Handle named by an entity step: the explicit one, else the snapshot's.
fn step_handle(explicit: Option<ForeignHandle>, from_snapshot: Option<ForeignHandle>) -> Result<ForeignHandle> {
    match (explicit, from_snapshot) {
        (Some(handle), Some(snapshot)) if handle != snapshot => {
            bail!("Event handle {} does not match snapshot handle {}", handle, snapshot)
        }
        (Some(handle), _) | (None, Some(handle)) => Ok(handle),
        (None, None) => bail!("Event names no handle and carries no snapshot"),
    }
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::ChatItem { .. } => "chatItem",
            ScriptStep::ChatRemoved { .. } => "chatRemoved",
            ScriptStep::Connection { .. } => "connection",
            ScriptStep::AllChatsConnected => "allChatsConnected",
            ScriptStep::OnlineStatus { .. } => "onlineStatus",
            ScriptStep::Contact { .. } => "contact",
            ScriptStep::ContactRemoved { .. } => "contactRemoved",
            ScriptStep::FirstName { .. } => "firstName",
            ScriptStep::InitState { .. } => "initState",
            ScriptStep::ShowWindow { .. } => "showWindow",
            ScriptStep::ClosePreview { .. } => "closePreview",
            ScriptStep::ToggleArchived => "toggleArchived",
            ScriptStep::SetArchivedVisible { .. } => "setArchivedVisible",
            ScriptStep::Flush => "flush",
        }
    }

    /// Check the step on its own: flag names resolve and the event handle
    /// agrees with its snapshot.
    pub fn validate(&self) -> Result<()> {
        match self {
            ScriptStep::ChatItem { handle, item, changes } => {
                step_handle(*handle, item.as_ref().map(|i| i.chat_id))?;
                if let Some(names) = changes {
                    parse_changes(names, ChatChanges::from_name)?;
                }
            }
            ScriptStep::Contact { handle, record, changes } => {
                step_handle(*handle, record.as_ref().map(|r| r.handle))?;
                parse_changes(changes, ContactChanges::from_name)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Build the engine input. Mismatched handles are passed through so the
    /// engine's own rejection is what gets exercised.
    pub fn to_action(&self) -> Result<Action> {
        let action = match self {
            ScriptStep::ChatItem { handle, item, changes } => {
                let handle = match (handle, item) {
                    (Some(handle), _) => *handle,
                    (None, Some(item)) => item.chat_id,
                    (None, None) => bail!("Event names no handle and carries no snapshot"),
                };
                let (kind, changes) = match changes {
                    Some(names) => (UpdateKind::FieldChange, parse_changes(names, ChatChanges::from_name)?),
                    None => (UpdateKind::FullReplace, ChatChanges::NONE),
                };
                Action::Session(SessionEvent::ChatListItem(ChatListEvent {
                    kind,
                    handle,
                    changes,
                    snapshot: item.clone().map(Box::new),
                }))
            }
            ScriptStep::ChatRemoved { chat } => Action::Session(SessionEvent::ChatRemoved { chat: *chat }),
            ScriptStep::Connection { chat, state } => Action::Session(SessionEvent::ChatConnectionState {
                chat: *chat,
                state: *state,
            }),
            ScriptStep::AllChatsConnected => Action::Session(SessionEvent::all_chats_connected()),
            ScriptStep::OnlineStatus {
                user,
                status,
                in_progress,
            } => Action::Session(SessionEvent::OnlineStatus {
                user: *user,
                status: *status,
                in_progress: *in_progress,
            }),
            ScriptStep::Contact { handle, record, changes } => {
                let handle = match (handle, record) {
                    (Some(handle), _) => *handle,
                    (None, Some(record)) => record.handle,
                    (None, None) => bail!("Event names no handle and carries no snapshot"),
                };
                Action::Session(SessionEvent::Contact(ContactEvent {
                    handle,
                    changes: parse_changes(changes, ContactChanges::from_name)?,
                    snapshot: record.clone().map(Box::new),
                }))
            }
            ScriptStep::ContactRemoved { user } => Action::Session(SessionEvent::ContactRemoved { user: *user }),
            ScriptStep::FirstName { user, first_name } => Action::Session(SessionEvent::FirstNameUpdated {
                user: *user,
                first_name: first_name.clone(),
            }),
            ScriptStep::InitState { state } => Action::Session(SessionEvent::InitState(*state)),
            ScriptStep::ShowWindow { chat, window } => Action::ShowWindow {
                chat: *chat,
                window: WindowId(*window),
            },
            ScriptStep::ClosePreview { chat } => Action::ClosePreview { chat: *chat },
            ScriptStep::ToggleArchived => Action::ToggleArchived,
            ScriptStep::SetArchivedVisible { visible } => Action::SetArchivedVisible(*visible),
            ScriptStep::Flush => Action::Flush,
        };
        Ok(action)
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse script: {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid script JSON")
    }

    /// Validate every step; the error names the first offending one.
    pub fn validate(&self) -> Result<usize> {
        for (index, step) in self.events.iter().enumerate() {
            step.validate()
                .with_context(|| format!("Step {} ({}) is invalid", index, step.name()))?;
        }
        Ok(self.events.len())
    }
}
