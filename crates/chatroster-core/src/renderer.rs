//! The seam towards whatever draws the lists.
//!
//! The renderer owns widgets and windows; the engine only ever refers to them
//! through [`WidgetId`]/[`WindowId`] keys it was handed back.

use serde::Serialize;
use std::fmt;

use crate::constants::{LABEL_ALL_CHATS, LABEL_UNARCHIVED_CHATS};
use crate::controller::{ChatController, ContactController, DestroyedController, EntityController};
use crate::handle::{ForeignHandle, WidgetId, WindowId};
use crate::models::{ConnectionState, PresenceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    Chats,
    Contacts,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Chats => write!(f, "chat"),
            ListKind::Contacts => write!(f, "contact"),
        }
    }
}

/// In-place update of one rendered row or window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "patch", content = "value")]
pub enum RowPatch {
    Title(String),
    UnreadCount(i32),
    Tooltip(String),
    PreviewerCount(u32),
    ConnectionIndicator(ConnectionState),
    PresenceIndicator(PresenceStatus),
    /// A user's first name became known; windows relabel their messages.
    SenderFirstName { user: ForeignHandle, first_name: String },
}

/// Group sizes seen by a chat rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub active: usize,
    pub inactive: usize,
    pub archived: usize,
    pub archived_included: bool,
}

impl OrderSummary {
    pub fn label(&self) -> &'static str {
        if self.archived_included {
            LABEL_ALL_CHATS
        } else {
            LABEL_UNARCHIVED_CHATS
        }
    }
}

pub trait ListRenderer {
    /// Replace every chat row with `rows`, in order. Returns the widget key
    /// created for each row, in the same order.
    fn on_chat_order_rebuilt(&mut self, rows: &[&ChatController], summary: &OrderSummary) -> Vec<WidgetId>;

    /// Replace every contact row with `rows`, in order.
    fn on_contact_order_rebuilt(&mut self, rows: &[&ContactController]) -> Vec<WidgetId>;

    fn on_incremental_patch(&mut self, list: ListKind, handle: ForeignHandle, widget: WidgetId, patch: &RowPatch);

    fn on_window_patch(&mut self, _handle: ForeignHandle, _window: WindowId, _patch: &RowPatch) {}

    /// The controller is gone; drop its row and close its window, if any.
    fn on_controller_destroyed(&mut self, list: ListKind, destroyed: &DestroyedController);
}

/// One renderer callback, as recorded by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "call")]
pub enum RenderCall {
    ChatOrder {
        rows: Vec<ForeignHandle>,
        summary: OrderSummary,
    },
    ContactOrder {
        rows: Vec<ForeignHandle>,
    },
    Patch {
        list: ListKind,
        handle: ForeignHandle,
        widget: WidgetId,
        patch: RowPatch,
    },
    WindowPatch {
        handle: ForeignHandle,
        window: WindowId,
        patch: RowPatch,
    },
    Destroyed {
        list: ListKind,
        handle: ForeignHandle,
        window: Option<WindowId>,
    },
}

/// Headless renderer that hands out sequential widget keys and records
/// every callback.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_widget: u64,
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Take the calls recorded so far.
    pub fn drain(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn chat_rebuilds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::ChatOrder { .. }))
            .count()
    }

    pub fn contact_rebuilds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::ContactOrder { .. }))
            .count()
    }

    /// The most recent chat order, if any was rendered.
    pub fn last_chat_order(&self) -> Option<&[ForeignHandle]> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::ChatOrder { rows, .. } => Some(rows.as_slice()),
            _ => None,
        })
    }

    pub fn last_contact_order(&self) -> Option<&[ForeignHandle]> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::ContactOrder { rows } => Some(rows.as_slice()),
            _ => None,
        })
    }

    pub fn patches(&self) -> Vec<(ForeignHandle, &RowPatch)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Patch { handle, patch, .. } => Some((*handle, patch)),
                _ => None,
            })
            .collect()
    }

    fn allocate(&mut self, count: usize) -> Vec<WidgetId> {
        (0..count)
            .map(|_| {
                self.next_widget += 1;
                WidgetId(self.next_widget)
            })
            .collect()
    }
}

impl ListRenderer for RecordingRenderer {
    fn on_chat_order_rebuilt(&mut self, rows: &[&ChatController], summary: &OrderSummary) -> Vec<WidgetId> {
        self.calls.push(RenderCall::ChatOrder {
            rows: rows.iter().map(|c| c.handle()).collect(),
            summary: *summary,
        });
        self.allocate(rows.len())
    }

    fn on_contact_order_rebuilt(&mut self, rows: &[&ContactController]) -> Vec<WidgetId> {
        self.calls.push(RenderCall::ContactOrder {
            rows: rows.iter().map(|c| c.handle()).collect(),
        });
        self.allocate(rows.len())
    }

    fn on_incremental_patch(&mut self, list: ListKind, handle: ForeignHandle, widget: WidgetId, patch: &RowPatch) {
        self.calls.push(RenderCall::Patch {
            list,
            handle,
            widget,
            patch: patch.clone(),
        });
    }

    fn on_window_patch(&mut self, handle: ForeignHandle, window: WindowId, patch: &RowPatch) {
        self.calls.push(RenderCall::WindowPatch {
            handle,
            window,
            patch: patch.clone(),
        });
    }

    fn on_controller_destroyed(&mut self, list: ListKind, destroyed: &DestroyedController) {
        self.calls.push(RenderCall::Destroyed {
            list,
            handle: destroyed.handle,
            window: destroyed.window,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatListItem;
    use crate::snapshot::OwnedSnapshot;

    #[test]
    fn test_recording_renderer_hands_out_fresh_widgets() {
        let a = ChatController::new(OwnedSnapshot::new(ChatListItem::new(ForeignHandle::new(1), "a")));
        let b = ChatController::new(OwnedSnapshot::new(ChatListItem::new(ForeignHandle::new(2), "b")));
        let mut renderer = RecordingRenderer::new();

        let first = renderer.on_chat_order_rebuilt(&[&a, &b], &OrderSummary::default());
        let second = renderer.on_chat_order_rebuilt(&[&b], &OrderSummary::default());

        assert_eq!(first, vec![WidgetId(1), WidgetId(2)]);
        assert_eq!(second, vec![WidgetId(3)]);
        assert_eq!(renderer.chat_rebuilds(), 2);
        assert_eq!(renderer.last_chat_order(), Some(&[ForeignHandle::new(2)][..]));
    }

    #[test]
    fn test_summary_label() {
        let mut summary = OrderSummary::default();
        assert_eq!(summary.label(), LABEL_UNARCHIVED_CHATS);
        summary.archived_included = true;
        assert_eq!(summary.label(), LABEL_ALL_CHATS);
    }

    #[test]
    fn test_render_call_serializes_tagged() {
        let call = RenderCall::Patch {
            list: ListKind::Chats,
            handle: ForeignHandle::new(1),
            widget: WidgetId(2),
            patch: RowPatch::UnreadCount(3),
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["call"], "patch");
        assert_eq!(json["list"], "chats");
        assert_eq!(json["patch"]["patch"], "unreadCount");
        assert_eq!(json["patch"]["value"], 3);
    }

    #[test]
    fn test_drain_empties_log() {
        let mut renderer = RecordingRenderer::new();
        renderer.on_incremental_patch(ListKind::Contacts, ForeignHandle::new(1), WidgetId(1), &RowPatch::Title("x".into()));
        assert_eq!(renderer.drain().len(), 1);
        assert!(renderer.calls().is_empty());
    }
}
