//! Per-entity controllers.
//!
//! A controller owns the latest snapshot for one handle plus optional keys
//! into renderer-owned tables (its row widget and, for chats, an open
//! conversation window). The keys are never dereferenced here.

use serde::Serialize;

use crate::handle::{ForeignHandle, WidgetId, WindowId};
use crate::models::{ChatListItem, ContactRecord, Privilege};
use crate::snapshot::{BackendObject, OwnedSnapshot};

/// Visual group a chat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatClassification {
    Active,
    Inactive,
    Archived,
}

impl ChatClassification {
    pub fn of(item: &ChatListItem) -> Self {
        if item.archived {
            Self::Archived
        } else if item.active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// What is left of a controller once it has been destroyed: the renderer
/// references it held, so the caller can tell the renderer to let go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyedController {
    pub handle: ForeignHandle,
    pub widget: Option<WidgetId>,
    pub window: Option<WindowId>,
}

pub trait EntityController {
    type Item: BackendObject;

    fn new(snapshot: OwnedSnapshot<Self::Item>) -> Self;

    fn handle(&self) -> ForeignHandle;

    fn item(&self) -> &Self::Item;

    /// Swap in a newer snapshot; the previous one is released here.
    fn replace_snapshot(&mut self, snapshot: OwnedSnapshot<Self::Item>);

    fn widget(&self) -> Option<WidgetId>;

    fn set_widget(&mut self, widget: Option<WidgetId>);

    /// Release the snapshot and hand back every renderer reference.
    fn destroy(self) -> DestroyedController;
}

#[derive(Debug)]
pub struct ChatController {
    handle: ForeignHandle,
    snapshot: OwnedSnapshot<ChatListItem>,
    widget: Option<WidgetId>,
    window: Option<WindowId>,
}

impl ChatController {
    pub fn classification(&self) -> ChatClassification {
        ChatClassification::of(&self.snapshot)
    }

    pub fn own_privilege(&self) -> Privilege {
        self.snapshot.own_privilege
    }

    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Attach an open conversation window. Returns the window that stays
    /// attached: an already-open one wins over the new one.
    pub fn attach_window(&mut self, window: WindowId) -> WindowId {
        *self.window.get_or_insert(window)
    }
}

impl EntityController for ChatController {
    type Item = ChatListItem;

    fn new(snapshot: OwnedSnapshot<ChatListItem>) -> Self {
        Self {
            handle: snapshot.handle(),
            snapshot,
            widget: None,
            window: None,
        }
    }

    fn handle(&self) -> ForeignHandle {
        self.handle
    }

    fn item(&self) -> &ChatListItem {
        &self.snapshot
    }

    fn replace_snapshot(&mut self, snapshot: OwnedSnapshot<ChatListItem>) {
        self.snapshot = snapshot;
    }

    fn widget(&self) -> Option<WidgetId> {
        self.widget
    }

    fn set_widget(&mut self, widget: Option<WidgetId>) {
        self.widget = widget;
    }

    fn destroy(self) -> DestroyedController {
        DestroyedController {
            handle: self.handle,
            widget: self.widget,
            window: self.window,
        }
    }
}

#[derive(Debug)]
pub struct ContactController {
    handle: ForeignHandle,
    snapshot: OwnedSnapshot<ContactRecord>,
    widget: Option<WidgetId>,
}

impl ContactController {
    pub fn is_listed(&self) -> bool {
        self.snapshot.is_listed()
    }

    pub fn display_name(&self) -> &str {
        self.snapshot.display_name()
    }
}

impl EntityController for ContactController {
    type Item = ContactRecord;

    fn new(snapshot: OwnedSnapshot<ContactRecord>) -> Self {
        Self {
            handle: snapshot.handle(),
            snapshot,
            widget: None,
        }
    }

    fn handle(&self) -> ForeignHandle {
        self.handle
    }

    fn item(&self) -> &ContactRecord {
        &self.snapshot
    }

    fn replace_snapshot(&mut self, snapshot: OwnedSnapshot<ContactRecord>) {
        self.snapshot = snapshot;
    }

    fn widget(&self) -> Option<WidgetId> {
        self.widget
    }

    fn set_widget(&mut self, widget: Option<WidgetId>) {
        self.widget = widget;
    }

    fn destroy(self) -> DestroyedController {
        DestroyedController {
            handle: self.handle,
            widget: self.widget,
            window: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(raw: u64) -> ChatListItem {
        ChatListItem::new(ForeignHandle::new(raw), format!("chat {}", raw))
    }

    #[test]
    fn test_classification() {
        let active = chat(1);
        let inactive = ChatListItem { active: false, ..chat(2) };
        let archived = ChatListItem { archived: true, ..chat(3) };
        let archived_inactive = ChatListItem {
            archived: true,
            active: false,
            ..chat(4)
        };

        assert_eq!(ChatClassification::of(&active), ChatClassification::Active);
        assert_eq!(ChatClassification::of(&inactive), ChatClassification::Inactive);
        assert_eq!(ChatClassification::of(&archived), ChatClassification::Archived);
        assert_eq!(ChatClassification::of(&archived_inactive), ChatClassification::Archived);
    }

    #[test]
    fn test_replace_snapshot_swaps_whole_item() {
        let mut controller = ChatController::new(OwnedSnapshot::new(chat(1)));
        controller.set_widget(Some(WidgetId(9)));

        controller.replace_snapshot(OwnedSnapshot::new(ChatListItem {
            archived: true,
            ..chat(1)
        }));

        assert_eq!(controller.classification(), ChatClassification::Archived);
        assert_eq!(controller.widget(), Some(WidgetId(9)));
        assert_eq!(controller.handle(), ForeignHandle::new(1));
    }

    #[test]
    fn test_attach_window_keeps_open_window() {
        let mut controller = ChatController::new(OwnedSnapshot::new(chat(1)));
        assert_eq!(controller.attach_window(WindowId(1)), WindowId(1));
        assert_eq!(controller.attach_window(WindowId(2)), WindowId(1));
        assert_eq!(controller.window(), Some(WindowId(1)));
    }

    #[test]
    fn test_destroy_reports_references() {
        let mut controller = ChatController::new(OwnedSnapshot::new(chat(5)));
        controller.set_widget(Some(WidgetId(3)));
        controller.attach_window(WindowId(4));

        let destroyed = controller.destroy();
        assert_eq!(
            destroyed,
            DestroyedController {
                handle: ForeignHandle::new(5),
                widget: Some(WidgetId(3)),
                window: Some(WindowId(4)),
            }
        );
    }

    #[test]
    fn test_contact_controller_listing() {
        let mut record = ContactRecord::new(ForeignHandle::new(8), "x@y.z").with_first_name("Xi");
        let controller = ContactController::new(OwnedSnapshot::new(record.clone()));
        assert!(controller.is_listed());
        assert_eq!(controller.display_name(), "Xi");

        record.visibility = crate::models::Visibility::Hidden;
        let hidden = ContactController::new(OwnedSnapshot::new(record));
        assert!(!hidden.is_listed());
        assert_eq!(hidden.destroy().window, None);
    }
}
