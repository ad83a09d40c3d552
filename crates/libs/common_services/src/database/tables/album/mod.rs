pub mod album;
pub mod album_collaborator;
pub mod album_invite;
pub mod album_media_item;

pub use album::*;
pub use album_collaborator::*;
pub use album_invite::*;
pub use album_media_item::*;
