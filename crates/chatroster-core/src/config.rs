use serde::{Deserialize, Serialize};

use crate::handle::ForeignHandle;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    /// Initial value of the archived-rows toggle.
    pub show_archived: bool,

    /// The session user. Excluded from the contact list; its presence is
    /// tracked separately. Replaced by the backend's answer on session seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_user_handle: Option<ForeignHandle>,

    /// Skip the ordering gate, for backends that never emit the
    /// all-chats-connected signal.
    pub ordering_enabled_at_start: bool,
}

impl CoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_archived(mut self, show: bool) -> Self {
        self.show_archived = show;
        self
    }

    pub fn with_own_user_handle(mut self, handle: ForeignHandle) -> Self {
        self.own_user_handle = Some(handle);
        self
    }

    pub fn with_ordering_enabled_at_start(mut self, enabled: bool) -> Self {
        self.ordering_enabled_at_start = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: CoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(!config.show_archived);
        assert!(config.own_user_handle.is_none());
        assert!(!config.ordering_enabled_at_start);
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let json = r#"{"showArchived": true, "ownUserHandle": 7, "orderingEnabledAtStart": true}"#;
        let config: CoreConfig = serde_json::from_str(json).unwrap();
        assert!(config.show_archived);
        assert_eq!(config.own_user_handle, Some(ForeignHandle::new(7)));
        assert!(config.ordering_enabled_at_start);
    }

    #[test]
    fn test_builders() {
        let config = CoreConfig::new()
            .with_show_archived(true)
            .with_own_user_handle(ForeignHandle::new(1));
        assert!(config.show_archived);
        assert_eq!(config.own_user_handle, Some(ForeignHandle::new(1)));
    }
}
