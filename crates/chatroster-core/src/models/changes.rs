//! Changed-field bitsets carried by push notifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

macro_rules! change_flags {
    (
        $(#[$meta:meta])*
        $name:ident { $($flag:ident = $bit:expr => $label:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const NONE: Self = Self(0);
            $(pub const $flag: Self = Self($bit);)+

            const NAMED: &'static [(Self, &'static str)] = &[$((Self::$flag, $label),)+];

            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// True when every bit of `other` is set.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True when any bit of `other` is set.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::NAMED
                    .iter()
                    .find(|(_, label)| label.eq_ignore_ascii_case(name))
                    .map(|(flag, _)| *flag)
            }

            pub fn names(self) -> Vec<&'static str> {
                Self::NAMED
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, label)| *label)
                    .collect()
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.names().join("|"))
            }
        }
    };
}

change_flags! {
    /// Fields changed on a chat-list item.
    ChatChanges {
        STATUS = 0x01 => "status",
        OWN_PRIV = 0x02 => "ownPriv",
        UNREAD_COUNT = 0x04 => "unreadCount",
        PARTICIPANTS = 0x08 => "participants",
        TITLE = 0x10 => "title",
        CLOSED = 0x20 => "closed",
        LAST_MSG = 0x40 => "lastMsg",
        LAST_TS = 0x80 => "lastTs",
        ARCHIVE = 0x100 => "archive",
        CALL = 0x200 => "call",
        CHAT_MODE = 0x400 => "chatMode",
        UPDATE_PREVIEWERS = 0x800 => "previewers",
    }
}

change_flags! {
    /// Fields changed on a user record.
    ContactChanges {
        FIRSTNAME = 0x01 => "firstname",
        LASTNAME = 0x02 => "lastname",
        EMAIL = 0x04 => "email",
        AVATAR = 0x08 => "avatar",
        VISIBILITY = 0x10 => "visibility",
    }
}

impl ChatChanges {
    /// Field changes that can move an entity in the sort order or between
    /// visual groups.
    pub const STRUCTURAL: Self = Self(
        Self::CLOSED.0 | Self::LAST_TS.0 | Self::ARCHIVE.0 | Self::UNREAD_COUNT.0 | Self::CHAT_MODE.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_intersects() {
        let changes = ChatChanges::TITLE | ChatChanges::LAST_MSG;
        assert!(changes.contains(ChatChanges::TITLE));
        assert!(!changes.contains(ChatChanges::TITLE | ChatChanges::ARCHIVE));
        assert!(changes.intersects(ChatChanges::TITLE | ChatChanges::ARCHIVE));
        assert!(!changes.intersects(ChatChanges::STRUCTURAL));
        assert!(ChatChanges::NONE.is_empty());
    }

    #[test]
    fn test_names_lookup() {
        assert_eq!(ChatChanges::from_name("lastTs"), Some(ChatChanges::LAST_TS));
        assert_eq!(ChatChanges::from_name("LASTTS"), Some(ChatChanges::LAST_TS));
        assert_eq!(ChatChanges::from_name("nope"), None);
        assert_eq!(
            (ChatChanges::OWN_PRIV | ChatChanges::TITLE).names(),
            vec!["ownPriv", "title"]
        );
        assert_eq!(ContactChanges::from_name("visibility"), Some(ContactChanges::VISIBILITY));
    }

    #[test]
    fn test_insert() {
        let mut changes = ContactChanges::NONE;
        changes.insert(ContactChanges::EMAIL);
        changes |= ContactChanges::FIRSTNAME;
        assert_eq!(changes.bits(), 0x05);
        assert_eq!(format!("{:?}", changes), "ContactChanges(firstname|email)");
    }
}
