//! Grouping and sort policy for the visible lists.

use std::cmp::Ordering;

use crate::controller::{ChatClassification, ChatController, ContactController, EntityController};
use crate::handle::ForeignHandle;
use crate::models::{ChatListItem, ContactRecord};
use crate::registry::ControllerRegistry;
use crate::renderer::OrderSummary;

/// Sort order within a chat partition.
pub type ChatComparator = fn(&ChatListItem, &ChatListItem) -> Ordering;

/// Most recent activity first, ties broken by ascending handle.
pub fn recent_activity_first(a: &ChatListItem, b: &ChatListItem) -> Ordering {
    b.last_timestamp
        .cmp(&a.last_timestamp)
        .then_with(|| a.chat_id.cmp(&b.chat_id))
}

/// Case-insensitive display name, ties broken by ascending handle.
pub fn display_name_order(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    a.display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase())
        .then_with(|| a.handle.cmp(&b.handle))
}

/// Chat rows in display order plus what went into them.
pub struct ChatOrder<'a> {
    pub rows: Vec<&'a ChatController>,
    pub summary: OrderSummary,
}

impl ChatOrder<'_> {
    pub fn handles(&self) -> Vec<ForeignHandle> {
        self.rows.iter().map(|c| c.handle()).collect()
    }
}

/// Active and inactive chats first, then archived ones when shown. Each
/// partition is sorted on its own.
pub fn order_chats(
    registry: &ControllerRegistry<ChatController>,
    archived_visible: bool,
    compare: ChatComparator,
) -> ChatOrder<'_> {
    let mut unarchived = Vec::new();
    let mut archived = Vec::new();
    let mut summary = OrderSummary {
        archived_included: archived_visible,
        ..Default::default()
    };

    for controller in registry.iter() {
        match controller.classification() {
            ChatClassification::Active => {
                summary.active += 1;
                unarchived.push(controller);
            }
            ChatClassification::Inactive => {
                summary.inactive += 1;
                unarchived.push(controller);
            }
            ChatClassification::Archived => {
                summary.archived += 1;
                archived.push(controller);
            }
        }
    }

    unarchived.sort_by(|a, b| compare(a.item(), b.item()));
    let mut rows = unarchived;
    if archived_visible {
        archived.sort_by(|a, b| compare(a.item(), b.item()));
        rows.extend(archived);
    }

    ChatOrder { rows, summary }
}

/// Listed contacts, minus the session user, by display name.
pub fn order_contacts(
    registry: &ControllerRegistry<ContactController>,
    own_user: Option<ForeignHandle>,
) -> Vec<&ContactController> {
    let mut rows: Vec<&ContactController> = registry
        .iter()
        .filter(|c| c.is_listed() && Some(c.handle()) != own_user)
        .collect();
    rows.sort_by(|a, b| display_name_order(a.item(), b.item()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::OwnedSnapshot;

    fn registry_with(items: Vec<ChatListItem>) -> ControllerRegistry<ChatController> {
        let mut registry = ControllerRegistry::new();
        for item in items {
            registry.upsert(item.chat_id, OwnedSnapshot::new(item));
        }
        registry
    }

    fn item(raw: u64, ts: i64) -> ChatListItem {
        ChatListItem {
            last_timestamp: ts,
            ..ChatListItem::new(ForeignHandle::new(raw), format!("c{}", raw))
        }
    }

    fn raws(handles: Vec<ForeignHandle>) -> Vec<u64> {
        handles.into_iter().map(|h| h.raw()).collect()
    }

    #[test]
    fn test_recent_activity_first_with_handle_tiebreak() {
        let registry = registry_with(vec![item(1, 10), item(2, 30), item(3, 20), item(4, 30)]);
        let order = order_chats(&registry, false, recent_activity_first);
        assert_eq!(raws(order.handles()), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_inactive_chats_share_the_unarchived_partition() {
        let registry = registry_with(vec![
            item(1, 10),
            ChatListItem { active: false, ..item(2, 50) },
        ]);
        let order = order_chats(&registry, false, recent_activity_first);
        assert_eq!(raws(order.handles()), vec![2, 1]);
        assert_eq!(order.summary.active, 1);
        assert_eq!(order.summary.inactive, 1);
    }

    #[test]
    fn test_archived_hidden_unless_visible() {
        let registry = registry_with(vec![
            item(1, 10),
            ChatListItem { archived: true, ..item(2, 99) },
            ChatListItem { archived: true, ..item(3, 5) },
        ]);

        let hidden = order_chats(&registry, false, recent_activity_first);
        assert_eq!(raws(hidden.handles()), vec![1]);
        assert_eq!(hidden.summary.archived, 2);
        assert!(!hidden.summary.archived_included);

        let shown = order_chats(&registry, true, recent_activity_first);
        // Archived rows keep their own partition even when more recent.
        assert_eq!(raws(shown.handles()), vec![1, 2, 3]);
        assert!(shown.summary.archived_included);
    }

    #[test]
    fn test_custom_comparator() {
        fn by_title(a: &ChatListItem, b: &ChatListItem) -> Ordering {
            a.title.cmp(&b.title)
        }
        let registry = registry_with(vec![
            ChatListItem { title: "b".into(), ..item(1, 0) },
            ChatListItem { title: "a".into(), ..item(2, 0) },
        ]);
        let order = order_chats(&registry, false, by_title);
        assert_eq!(raws(order.handles()), vec![2, 1]);
    }

    #[test]
    fn test_contacts_sorted_by_name_without_self_or_hidden() {
        let mut registry: ControllerRegistry<ContactController> = ControllerRegistry::new();
        let records = vec![
            ContactRecord::new(ForeignHandle::new(1), "zed@x").with_first_name("zed"),
            ContactRecord::new(ForeignHandle::new(2), "amy@x").with_first_name("Amy"),
            ContactRecord::new(ForeignHandle::new(3), "me@x"),
            ContactRecord {
                visibility: crate::models::Visibility::Hidden,
                ..ContactRecord::new(ForeignHandle::new(4), "gone@x")
            },
            ContactRecord::new(ForeignHandle::new(5), "bob@x"),
        ];
        for record in records {
            registry.upsert(record.handle, OwnedSnapshot::new(record));
        }

        let rows = order_contacts(&registry, Some(ForeignHandle::new(3)));
        let names: Vec<&str> = rows.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["Amy", "bob@x", "zed"]);
    }
}
