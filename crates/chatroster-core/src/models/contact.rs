use serde::{Deserialize, Serialize};

use crate::handle::ForeignHandle;
use crate::snapshot::BackendObject;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Unknown,
    Hidden,
    Visible,
    Inactive,
    Blocked,
}

/// A user record from the backend's contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    pub handle: ForeignHandle,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub visibility: Visibility,
}

impl ContactRecord {
    pub fn new(handle: ForeignHandle, email: impl Into<String>) -> Self {
        Self {
            handle,
            email: email.into(),
            first_name: None,
            visibility: Visibility::Visible,
        }
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// First name when set, email otherwise.
    pub fn display_name(&self) -> &str {
        match self.first_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// Only visible contacts get a row.
    pub fn is_listed(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn tooltip(&self) -> String {
        format!("{}\nEmail: {}\nUser handle: {}", self.display_name(), self.email, self.handle)
    }
}

impl BackendObject for ContactRecord {
    const ENTITY: &'static str = "user record";

    fn handle(&self) -> ForeignHandle {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_name() {
        let contact = ContactRecord::new(ForeignHandle::new(1), "ana@example.com");
        assert_eq!(contact.display_name(), "ana@example.com");

        let named = contact.clone().with_first_name("Ana");
        assert_eq!(named.display_name(), "Ana");

        let blank = contact.with_first_name("   ");
        assert_eq!(blank.display_name(), "ana@example.com");
    }

    #[test]
    fn test_only_visible_contacts_are_listed() {
        let mut contact = ContactRecord::new(ForeignHandle::new(1), "a@b.c");
        assert!(contact.is_listed());
        contact.visibility = Visibility::Inactive;
        assert!(!contact.is_listed());
        contact.visibility = Visibility::Unknown;
        assert!(!contact.is_listed());
    }
}
