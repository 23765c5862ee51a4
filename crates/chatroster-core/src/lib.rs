//! Chat and contact list reconciliation for a desktop chat client.
//!
//! The backend pushes partial, out-of-order change notifications; this crate
//! mirrors them into per-entity controllers and decides, event by event,
//! whether the visible list needs a full reorder or an in-place patch.

pub mod backend;
pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod handle;
pub mod models;
pub mod ordering;
pub mod registry;
pub mod renderer;
pub mod snapshot;

pub use backend::{ChatBackend, MemoryBackend};
pub use config::CoreConfig;
pub use controller::{ChatClassification, ChatController, ContactController, DestroyedController, EntityController};
pub use engine::{ApplyOutcome, EngineStats, FlushOutcome, ReconciliationEngine};
pub use error::RosterError;
pub use events::{ChatListEvent, ContactEvent, InitState, SessionEvent, UpdateKind};
pub use handle::{ForeignHandle, WidgetId, WindowId};
pub use models::{ChatChanges, ChatListItem, ConnectionState, ContactChanges, ContactRecord, PresenceStatus, Privilege, Visibility};
pub use registry::ControllerRegistry;
pub use renderer::{ListKind, ListRenderer, OrderSummary, RecordingRenderer, RenderCall, RowPatch};
pub use snapshot::{BackendObject, OwnedSnapshot};
