pub mod album;
pub mod family_member;
pub mod folder;
pub mod media_item;

pub use album::*;
pub use family_member::*;
pub use folder::*;
pub use media_item::*;
