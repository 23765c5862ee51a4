use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::INVALID_HANDLE_RAW;

/// Opaque 64-bit identifier the backend assigns to a chat or a user.
///
/// Carries no meaning beyond equality and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForeignHandle(u64);

impl ForeignHandle {
    pub const INVALID: ForeignHandle = ForeignHandle(INVALID_HANDLE_RAW);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Big-endian hex form, 16 characters.
    pub fn to_hex(self) -> String {
        hex::encode(self.0.to_be_bytes())
    }
}

impl Default for ForeignHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<u64> for ForeignHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ForeignHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "INVALID")
        }
    }
}

/// Key of a row widget inside the renderer's own table.
///
/// Controllers hold these instead of pointers; the renderer decides what they
/// resolve to, and a stale id simply fails to resolve on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u64);

/// Key of an open conversation window inside the renderer's own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_all_ones() {
        assert_eq!(ForeignHandle::INVALID.raw(), u64::MAX);
        assert!(!ForeignHandle::INVALID.is_valid());
        assert!(ForeignHandle::new(0).is_valid());
        assert_eq!(ForeignHandle::default(), ForeignHandle::INVALID);
    }

    #[test]
    fn test_hex_form() {
        let handle = ForeignHandle::new(0x0102_0304_0506_0708);
        assert_eq!(handle.to_hex(), "0102030405060708");
        assert_eq!(handle.to_string(), "0102030405060708");
        assert_eq!(ForeignHandle::INVALID.to_string(), "INVALID");
    }

    #[test]
    fn test_handles_order_by_raw_value() {
        let mut handles = vec![ForeignHandle::new(30), ForeignHandle::new(10), ForeignHandle::new(20)];
        handles.sort();
        assert_eq!(handles, vec![ForeignHandle::new(10), ForeignHandle::new(20), ForeignHandle::new(30)]);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ForeignHandle::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: ForeignHandle = serde_json::from_str("42").unwrap();
        assert_eq!(back, ForeignHandle::new(42));
    }
}
