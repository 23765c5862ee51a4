use crate::handle::ForeignHandle;
use crate::renderer::ListKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// The backend handed over nothing where an owned object was promised.
    #[error("Null {entity} handed over for ownership")]
    NullSnapshot { entity: &'static str },

    /// A patch or removal named a handle the registry does not hold.
    /// Absorbed by the engine; backend delivery is not strictly causal.
    #[error("Unknown {list} handle {handle}")]
    UnknownHandle { list: ListKind, handle: ForeignHandle },

    #[error("Controller keyed by {key} holds a snapshot for {snapshot}")]
    HandleMismatch {
        key: ForeignHandle,
        snapshot: ForeignHandle,
    },
}
