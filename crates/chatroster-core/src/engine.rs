//! Reconciliation engine.
//!
//! Mirrors backend push events into the chat and contact registries and
//! decides, per event, whether the visible order is still valid or a rebuild
//! is needed. Rebuilds are coalesced: events only mark them pending and
//! [`ReconciliationEngine::flush`] performs at most one per list.
//!
//! Until the backend reports that every chat is connected, chat updates are
//! mirrored but produce no UI work. The initial sync delivers one event per
//! chat per state transition, and rebuilding on each would be quadratic.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::backend::ChatBackend;
use crate::config::CoreConfig;
use crate::constants::codes;
use crate::controller::{ChatClassification, ChatController, ContactController, EntityController};
use crate::error::RosterError;
use crate::events::{ChatListEvent, ContactEvent, InitState, SessionEvent, UpdateKind};
use crate::handle::{ForeignHandle, WidgetId, WindowId};
use crate::models::{ChatChanges, ChatListItem, ConnectionState, ContactChanges, PresenceStatus, Privilege};
use crate::ordering::{order_chats, order_contacts, recent_activity_first};
use crate::registry::ControllerRegistry;
use crate::renderer::{ListKind, ListRenderer, RowPatch};
use crate::snapshot::OwnedSnapshot;

/// What applying a single entity event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Mirrored, but held back by the ordering gate.
    Suppressed,
    /// A rebuild is pending; nothing was patched.
    ReorderPending,
    /// This many in-place patches went to the renderer.
    Patched(usize),
    /// Mirrored; the entity has no rendered row to patch.
    Unrendered,
    /// Not tracked (the session user in the contact list).
    Ignored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    pub chats_rebuilt: bool,
    pub contacts_rebuilt: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    pub events: usize,
    pub suppressed: usize,
    pub chat_rebuilds: usize,
    pub contact_rebuilds: usize,
    pub patches: usize,
    pub absorbed_unknown: usize,
}

/// Why a chat event invalidated the visible order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderReason {
    /// The handle was not in the registry before.
    FirstSight,
    /// A sort-relevant field changed (the flags that did).
    Structural(ChatChanges),
    /// Own privilege dropped to removed.
    PrivilegeRemoved,
    /// Own privilege was removed and is no longer.
    PrivilegeRestored,
    /// Moved between active, inactive and archived without a flag saying so.
    Regrouped,
}

impl ReorderReason {
    /// Whether the backend's change flags alone asked for the reorder.
    pub fn is_flagged(self) -> bool {
        !matches!(self, ReorderReason::FirstSight | ReorderReason::Regrouped)
    }
}

/// Chat state captured before a snapshot is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorState {
    pub classification: ChatClassification,
    pub privilege: Privilege,
}

/// Reorder decision for one chat event. `None` means an in-place patch
/// suffices.
pub fn decide_reorder(changes: ChatChanges, prior: Option<PriorState>, current: &ChatListItem) -> Option<ReorderReason> {
    let Some(prior) = prior else {
        return Some(ReorderReason::FirstSight);
    };

    if changes.intersects(ChatChanges::STRUCTURAL) {
        let structural = ChatChanges::from_bits(changes.bits() & ChatChanges::STRUCTURAL.bits());
        return Some(ReorderReason::Structural(structural));
    }

    let now = current.own_privilege;
    if now.is_removed() && !prior.privilege.is_removed() {
        return Some(ReorderReason::PrivilegeRemoved);
    }
    if prior.privilege.is_removed() && now > Privilege::Removed {
        return Some(ReorderReason::PrivilegeRestored);
    }

    if ChatClassification::of(current) != prior.classification {
        return Some(ReorderReason::Regrouped);
    }

    None
}

/// Row patches for the non-structural fields in `changes`.
pub fn chat_patches(changes: ChatChanges, item: &ChatListItem, sender_name: Option<&str>) -> Vec<RowPatch> {
    let mut patches = Vec::new();
    if changes.contains(ChatChanges::TITLE) {
        patches.push(RowPatch::Title(item.display_title().to_string()));
    }
    if changes.contains(ChatChanges::UNREAD_COUNT) {
        patches.push(RowPatch::UnreadCount(item.unread_count));
    }
    if changes.intersects(ChatChanges::LAST_MSG | ChatChanges::OWN_PRIV | ChatChanges::PARTICIPANTS) {
        patches.push(RowPatch::Tooltip(item.tooltip(sender_name)));
    }
    if changes.contains(ChatChanges::UPDATE_PREVIEWERS) {
        patches.push(RowPatch::PreviewerCount(item.num_previewers));
    }
    patches
}

fn resolve_sender<'a>(
    contacts: &'a ControllerRegistry<ContactController>,
    first_names: &'a HashMap<ForeignHandle, String>,
    user: ForeignHandle,
) -> Option<&'a str> {
    first_names
        .get(&user)
        .map(String::as_str)
        .or_else(|| contacts.get(user).map(|c| c.display_name()))
}

fn attach_widgets<C: EntityController>(
    registry: &mut ControllerRegistry<C>,
    list: ListKind,
    handles: &[ForeignHandle],
    widgets: Vec<WidgetId>,
) {
    if widgets.len() != handles.len() {
        warn!(
            %list,
            rows = handles.len(),
            widgets = widgets.len(),
            "renderer returned a widget count that does not match the rows"
        );
    }
    for (handle, widget) in handles.iter().zip(widgets) {
        if let Some(controller) = registry.get_mut(*handle) {
            controller.set_widget(Some(widget));
        }
    }
}

pub struct ReconciliationEngine<R: ListRenderer> {
    config: CoreConfig,
    chats: ControllerRegistry<ChatController>,
    contacts: ControllerRegistry<ContactController>,
    renderer: R,

    ordering_enabled: bool,
    archived_visible: bool,
    pending_reorder: bool,
    pending_contact_rebuild: bool,

    own_user: Option<ForeignHandle>,
    own_presence: Option<PresenceStatus>,
    /// Names learned from first-name notifications, used for tooltips.
    first_names: HashMap<ForeignHandle, String>,

    stats: EngineStats,
}

impl<R: ListRenderer> ReconciliationEngine<R> {
    pub fn new(config: CoreConfig, renderer: R) -> Self {
        Self {
            ordering_enabled: config.ordering_enabled_at_start,
            archived_visible: config.show_archived,
            own_user: config.own_user_handle,
            config,
            chats: ControllerRegistry::new(),
            contacts: ControllerRegistry::new(),
            renderer,
            pending_reorder: false,
            pending_contact_rebuild: false,
            own_presence: None,
            first_names: HashMap::new(),
            stats: EngineStats::default(),
        }
    }

    // ===== Getters =====

    pub fn chats(&self) -> &ControllerRegistry<ChatController> {
        &self.chats
    }

    pub fn contacts(&self) -> &ControllerRegistry<ContactController> {
        &self.contacts
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn ordering_enabled(&self) -> bool {
        self.ordering_enabled
    }

    pub fn archived_visible(&self) -> bool {
        self.archived_visible
    }

    pub fn has_pending_reorder(&self) -> bool {
        self.pending_reorder
    }

    pub fn has_pending_contact_rebuild(&self) -> bool {
        self.pending_contact_rebuild
    }

    pub fn own_user(&self) -> Option<ForeignHandle> {
        self.own_user
    }

    pub fn own_presence(&self) -> Option<PresenceStatus> {
        self.own_presence
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn chat_window(&self, chat: ForeignHandle) -> Option<WindowId> {
        self.chats.get(chat).and_then(|c| c.window())
    }

    /// The chat order a rebuild would render right now.
    pub fn chat_order(&self) -> Vec<ForeignHandle> {
        order_chats(&self.chats, self.archived_visible, recent_activity_first).handles()
    }

    pub fn contact_order(&self) -> Vec<ForeignHandle> {
        order_contacts(&self.contacts, self.own_user)
            .iter()
            .map(|c| c.handle())
            .collect()
    }

    // ===== Chat events =====

    /// Mirror a chat-list change and decide between reorder and patch.
    ///
    /// Errors when the backend handed over no snapshot, or a snapshot for a
    /// different handle than the event names. Neither is retried.
    pub fn apply(&mut self, event: ChatListEvent) -> Result<ApplyOutcome, RosterError> {
        self.stats.events += 1;
        let ChatListEvent {
            kind,
            handle,
            changes,
            snapshot,
        } = event;

        let snapshot = OwnedSnapshot::adopt(snapshot)?;
        if snapshot.handle() != handle {
            return Err(RosterError::HandleMismatch {
                key: handle,
                snapshot: snapshot.handle(),
            });
        }

        let previous = self.chats.get(handle);
        let prior = previous.map(|c| PriorState {
            classification: c.classification(),
            privilege: c.own_privilege(),
        });
        let changes = match (kind, previous) {
            (UpdateKind::FullReplace, Some(existing)) => snapshot.changes_since(existing.item()),
            _ => changes,
        };

        let controller: &ChatController = self.chats.upsert(handle, snapshot);

        if !self.ordering_enabled && !changes.contains(ChatChanges::UPDATE_PREVIEWERS) {
            self.stats.suppressed += 1;
            trace!(%handle, ?changes, "chat update held until all chats are connected");
            return Ok(ApplyOutcome::Suppressed);
        }

        // Only flagged changes may reorder a gated list; the gating signal's
        // rebuild picks up new and regrouped chats.
        let reason = decide_reorder(changes, prior, controller.item())
            .filter(|reason| self.ordering_enabled || reason.is_flagged());
        if let Some(reason) = reason {
            debug!(%handle, ?reason, "chat list reorder pending");
            self.pending_reorder = true;
            return Ok(ApplyOutcome::ReorderPending);
        }
        if self.pending_reorder {
            // The pending rebuild repaints every row anyway.
            return Ok(ApplyOutcome::ReorderPending);
        }

        let widget = controller.widget();
        let window = controller.window();
        if widget.is_none() && window.is_none() {
            return Ok(ApplyOutcome::Unrendered);
        }

        let item = controller.item();
        let sender = resolve_sender(&self.contacts, &self.first_names, item.last_message_sender);
        let patches = chat_patches(changes, item, sender);

        let mut sent = 0;
        if let Some(widget) = widget {
            for patch in &patches {
                trace!(%handle, %widget, ?patch, "patching chat row");
                self.renderer.on_incremental_patch(ListKind::Chats, handle, widget, patch);
                sent += 1;
            }
        }
        if let Some(window) = window {
            for patch in patches.iter().filter(|p| matches!(p, RowPatch::PreviewerCount(_))) {
                self.renderer.on_window_patch(handle, window, patch);
                sent += 1;
            }
        }
        self.stats.patches += sent;
        Ok(ApplyOutcome::Patched(sent))
    }

    /// Destroy a chat's controller, closing its window. Unknown handles are
    /// absorbed.
    pub fn remove_chat(&mut self, chat: ForeignHandle) -> bool {
        let Some(destroyed) = self.chats.destroy(chat) else {
            self.absorb(RosterError::UnknownHandle {
                list: ListKind::Chats,
                handle: chat,
            });
            return false;
        };

        debug!(%chat, window = ?destroyed.window, "chat controller destroyed");
        self.renderer.on_controller_destroyed(ListKind::Chats, &destroyed);
        if self.ordering_enabled {
            self.pending_reorder = true;
        }
        true
    }

    /// Per-chat connection state. The invalid handle paired with `Online`
    /// is the gating signal: ordering is enabled and the list rebuilt once.
    /// Returns whether a rebuild happened.
    pub fn on_connection_state(&mut self, chat: ForeignHandle, state: ConnectionState) -> bool {
        if !chat.is_valid() {
            if state != ConnectionState::Online {
                debug!(?state, "connection state without a chat handle ignored");
                return false;
            }
            if !self.ordering_enabled {
                info!("all chats connected, chat ordering enabled");
            }
            self.ordering_enabled = true;
            self.rebuild_order();
            return true;
        }

        let Some(controller) = self.chats.get(chat) else {
            self.absorb(RosterError::UnknownHandle {
                list: ListKind::Chats,
                handle: chat,
            });
            return false;
        };
        if let Some(widget) = controller.widget() {
            self.renderer.on_incremental_patch(
                ListKind::Chats,
                chat,
                widget,
                &RowPatch::ConnectionIndicator(state),
            );
            self.stats.patches += 1;
        }
        false
    }

    /// Close a chat preview: tell the backend, drop the window and the
    /// controller, and rebuild. Chats that are not previews are left alone.
    pub fn close_chat_preview<B: ChatBackend>(&mut self, chat: ForeignHandle, backend: &mut B) -> bool {
        let Some(controller) = self.chats.get(chat) else {
            self.absorb(RosterError::UnknownHandle {
                list: ListKind::Chats,
                handle: chat,
            });
            return false;
        };
        if !controller.item().preview {
            debug!(%chat, "close preview requested for a joined chat, ignoring");
            return false;
        }

        backend.close_chat_preview(chat);
        if let Some(destroyed) = self.chats.destroy(chat) {
            self.renderer.on_controller_destroyed(ListKind::Chats, &destroyed);
        }
        info!(%chat, "chat preview closed");
        self.rebuild_order();
        true
    }

    /// Attach an open conversation window to a chat. Returns the window now
    /// attached, which is the existing one if the chat already had a window.
    pub fn show_chat_window(&mut self, chat: ForeignHandle, window: WindowId) -> Option<WindowId> {
        match self.chats.get_mut(chat) {
            Some(controller) => Some(controller.attach_window(window)),
            None => {
                self.absorb(RosterError::UnknownHandle {
                    list: ListKind::Chats,
                    handle: chat,
                });
                None
            }
        }
    }

    // ===== Contact events =====

    /// Mirror a contact change. Membership changes mark the contact list for
    /// rebuild; name changes patch the row in place.
    pub fn apply_contact(&mut self, event: ContactEvent) -> Result<ApplyOutcome, RosterError> {
        self.stats.events += 1;
        let ContactEvent {
            handle,
            changes,
            snapshot,
        } = event;

        let snapshot = OwnedSnapshot::adopt(snapshot)?;
        if snapshot.handle() != handle {
            return Err(RosterError::HandleMismatch {
                key: handle,
                snapshot: snapshot.handle(),
            });
        }
        if Some(handle) == self.own_user {
            return Ok(ApplyOutcome::Ignored);
        }

        let was_listed = self.contacts.get(handle).map(|c| c.is_listed());
        let controller: &ContactController = self.contacts.upsert(handle, snapshot);
        let now_listed = controller.is_listed();

        let membership_changed = match was_listed {
            None => now_listed,
            Some(was) => was != now_listed,
        };
        if membership_changed {
            debug!(%handle, listed = now_listed, "contact list rebuild pending");
            self.pending_contact_rebuild = true;
            return Ok(ApplyOutcome::ReorderPending);
        }
        if self.pending_contact_rebuild {
            return Ok(ApplyOutcome::ReorderPending);
        }

        let Some(widget) = controller.widget() else {
            return Ok(ApplyOutcome::Unrendered);
        };

        let record = controller.item();
        let mut patches = Vec::new();
        if changes.intersects(ContactChanges::FIRSTNAME | ContactChanges::LASTNAME) {
            patches.push(RowPatch::Title(record.display_name().to_string()));
        }
        if changes.intersects(ContactChanges::FIRSTNAME | ContactChanges::LASTNAME | ContactChanges::EMAIL) {
            patches.push(RowPatch::Tooltip(record.tooltip()));
        }
        for patch in &patches {
            self.renderer.on_incremental_patch(ListKind::Contacts, handle, widget, patch);
        }
        self.stats.patches += patches.len();
        Ok(ApplyOutcome::Patched(patches.len()))
    }

    pub fn remove_contact(&mut self, user: ForeignHandle) -> bool {
        let Some(destroyed) = self.contacts.destroy(user) else {
            self.absorb(RosterError::UnknownHandle {
                list: ListKind::Contacts,
                handle: user,
            });
            return false;
        };

        self.renderer.on_controller_destroyed(ListKind::Contacts, &destroyed);
        self.pending_contact_rebuild = true;
        true
    }

    /// Presence change. Our own presence is recorded; a contact's patches
    /// its online indicator. Presence of users without a row is dropped.
    pub fn on_online_status(&mut self, user: ForeignHandle, raw_status: i32, in_progress: bool) {
        if raw_status == codes::STATUS_INVALID {
            debug!(%user, "presence not yet known, shown as offline");
        }
        let status = PresenceStatus::from_raw(raw_status);

        if Some(user) == self.own_user {
            if !in_progress {
                debug!(?status, "own presence updated");
                self.own_presence = Some(status);
            }
            return;
        }

        let Some(widget) = self.contacts.get(user).and_then(|c| c.widget()) else {
            trace!(%user, "presence for a user without a contact row");
            return;
        };
        self.renderer.on_incremental_patch(
            ListKind::Contacts,
            user,
            widget,
            &RowPatch::PresenceIndicator(status),
        );
        self.stats.patches += 1;
    }

    /// A user's first name became known: retooltip chat rows whose last
    /// message they sent and relabel open windows. Contact rows are left to
    /// the contact's own FIRSTNAME update. Returns the number of patches sent.
    pub fn on_first_name(&mut self, user: ForeignHandle, first_name: String) -> usize {
        let mut sent = 0;
        for handle in self.chats.sorted_handles() {
            let Some(controller) = self.chats.get(handle) else {
                continue;
            };
            let item = controller.item();
            if let Some(widget) = controller.widget() {
                if item.last_message_sender == user {
                    let patch = RowPatch::Tooltip(item.tooltip(Some(&first_name)));
                    self.renderer.on_incremental_patch(ListKind::Chats, handle, widget, &patch);
                    sent += 1;
                }
            }
            if let Some(window) = controller.window() {
                let patch = RowPatch::SenderFirstName {
                    user,
                    first_name: first_name.clone(),
                };
                self.renderer.on_window_patch(handle, window, &patch);
                sent += 1;
            }
        }

        self.first_names.insert(user, first_name);
        self.stats.patches += sent;
        sent
    }

    // ===== Session lifecycle =====

    /// Replace every chat controller with the backend's current lists, merge
    /// in its contacts, and rebuild both lists once. Returns the number of
    /// chats seeded.
    pub fn seed_session<B: ChatBackend>(&mut self, backend: &B) -> usize {
        let me = backend.my_user_handle();
        if me.is_valid() {
            self.own_user = Some(me);
        }

        for destroyed in self.chats.clear_all() {
            self.renderer.on_controller_destroyed(ListKind::Chats, &destroyed);
        }

        let chats = backend
            .active_chat_items()
            .iter()
            .chain(backend.inactive_chat_items())
            .chain(backend.archived_chat_items());
        let mut seeded = 0;
        for item in chats {
            if !item.chat_id.is_valid() {
                warn!(title = %item.title, "backend listed a chat without a handle, skipping");
                continue;
            }
            self.chats.upsert(item.chat_id, OwnedSnapshot::copy_of(item));
            seeded += 1;
        }

        for record in backend.contacts() {
            if !record.handle.is_valid() || Some(record.handle) == self.own_user {
                continue;
            }
            self.contacts.upsert(record.handle, OwnedSnapshot::copy_of(record));
        }

        info!(
            chats = self.chats.len(),
            contacts = self.contacts.len(),
            "session seeded from backend"
        );
        self.rebuild_order();
        self.rebuild_contacts();
        seeded
    }

    /// Destroy every controller and reset per-session state, closing the
    /// ordering gate for the next session.
    pub fn clear_session(&mut self) {
        for destroyed in self.chats.clear_all() {
            self.renderer.on_controller_destroyed(ListKind::Chats, &destroyed);
        }
        for destroyed in self.contacts.clear_all() {
            self.renderer.on_controller_destroyed(ListKind::Contacts, &destroyed);
        }

        self.ordering_enabled = self.config.ordering_enabled_at_start;
        self.archived_visible = self.config.show_archived;
        self.pending_reorder = false;
        self.pending_contact_rebuild = false;
        self.own_user = self.config.own_user_handle;
        self.own_presence = None;
        self.first_names.clear();
        info!("session cleared");
    }

    pub fn toggle_archived(&mut self) {
        self.archived_visible = !self.archived_visible;
        info!(visible = self.archived_visible, "archived chats toggled");
        self.rebuild_order();
    }

    /// Returns whether the value changed (and the list was rebuilt).
    pub fn set_archived_visible(&mut self, visible: bool) -> bool {
        if self.archived_visible == visible {
            return false;
        }
        self.toggle_archived();
        true
    }

    // ===== Rebuilds =====

    /// Render the full chat order, replacing every row. Returns the order.
    pub fn rebuild_order(&mut self) -> Vec<ForeignHandle> {
        self.pending_reorder = false;
        for controller in self.chats.iter_mut() {
            controller.set_widget(None);
        }

        let order = order_chats(&self.chats, self.archived_visible, recent_activity_first);
        let handles = order.handles();
        let summary = order.summary;
        let widgets = self.renderer.on_chat_order_rebuilt(&order.rows, &summary);
        attach_widgets(&mut self.chats, ListKind::Chats, &handles, widgets);

        self.stats.chat_rebuilds += 1;
        debug!(
            rows = handles.len(),
            active = summary.active,
            inactive = summary.inactive,
            archived = summary.archived,
            label = summary.label(),
            "chat list rebuilt"
        );
        handles
    }

    pub fn rebuild_contacts(&mut self) -> Vec<ForeignHandle> {
        self.pending_contact_rebuild = false;
        for controller in self.contacts.iter_mut() {
            controller.set_widget(None);
        }

        let rows = order_contacts(&self.contacts, self.own_user);
        let handles: Vec<ForeignHandle> = rows.iter().map(|c| c.handle()).collect();
        let widgets = self.renderer.on_contact_order_rebuilt(&rows);
        attach_widgets(&mut self.contacts, ListKind::Contacts, &handles, widgets);

        self.stats.contact_rebuilds += 1;
        debug!(rows = handles.len(), "contact list rebuilt");
        handles
    }

    /// Perform the rebuilds pending since the last flush, at most one per
    /// list.
    pub fn flush(&mut self) -> FlushOutcome {
        let mut outcome = FlushOutcome::default();
        if self.pending_reorder {
            self.rebuild_order();
            outcome.chats_rebuilt = true;
        }
        if self.pending_contact_rebuild {
            self.rebuild_contacts();
            outcome.contacts_rebuilt = true;
        }
        outcome
    }

    // ===== Dispatch =====

    /// Route one push notification. Rebuilds stay pending; call
    /// [`flush`](Self::flush) once the burst is drained.
    pub fn dispatch<B: ChatBackend>(&mut self, event: SessionEvent, backend: &B) -> Result<(), RosterError> {
        match event {
            SessionEvent::ChatListItem(event) => {
                self.apply(event)?;
            }
            SessionEvent::ChatRemoved { chat } => {
                self.remove_chat(chat);
            }
            SessionEvent::ChatConnectionState { chat, state } => {
                self.on_connection_state(chat, state);
            }
            SessionEvent::OnlineStatus {
                user,
                status,
                in_progress,
            } => {
                self.on_online_status(user, status, in_progress);
            }
            SessionEvent::Contact(event) => {
                self.apply_contact(event)?;
            }
            SessionEvent::ContactRemoved { user } => {
                self.remove_contact(user);
            }
            SessionEvent::FirstNameUpdated { user, first_name } => {
                self.on_first_name(user, first_name);
            }
            SessionEvent::InitState(state) => match state {
                InitState::OnlineSession | InitState::OfflineSession => {
                    self.seed_session(backend);
                }
                InitState::Terminated => self.clear_session(),
                InitState::Error => warn!("backend reported an initialisation error"),
                InitState::Waiting | InitState::Anonymous => {
                    debug!(?state, "init state needs no list work");
                }
            },
        }
        Ok(())
    }

    /// Dispatch a burst of events, then flush once. Stops at the first
    /// error, leaving pending rebuilds for the caller's next flush.
    pub fn dispatch_all<B, I>(&mut self, events: I, backend: &B) -> Result<FlushOutcome, RosterError>
    where
        B: ChatBackend,
        I: IntoIterator<Item = SessionEvent>,
    {
        for event in events {
            self.dispatch(event, backend)?;
        }
        Ok(self.flush())
    }

    fn absorb(&mut self, error: RosterError) {
        warn!(%error, "ignoring event");
        self.stats.absorbed_unknown += 1;
    }
}
