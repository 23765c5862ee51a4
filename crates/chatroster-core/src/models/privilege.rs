use serde::{Deserialize, Serialize};

/// Own privilege level inside a chat. Declaration order is rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Privilege {
    #[default]
    Unknown,
    /// No longer a participant.
    Removed,
    ReadOnly,
    Standard,
    Moderator,
}

impl Privilege {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Removed => "removed",
            Self::ReadOnly => "read-only",
            Self::Standard => "standard",
            Self::Moderator => "moderator",
        }
    }

    pub fn is_removed(&self) -> bool {
        *self == Self::Removed
    }
}
