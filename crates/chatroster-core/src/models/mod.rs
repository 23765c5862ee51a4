pub mod changes;
pub mod chat_item;
pub mod contact;
pub mod presence;
pub mod privilege;

pub use changes::{ChatChanges, ContactChanges};
pub use chat_item::ChatListItem;
pub use contact::{ContactRecord, Visibility};
pub use presence::{ConnectionState, PresenceStatus};
pub use privilege::Privilege;
