mod album_store;
mod collaborator_store;
mod family_store;
mod folder_store;
mod invite_store;
mod media_store;

pub use album_store::*;
pub use collaborator_store::*;
pub use family_store::*;
pub use folder_store::*;
pub use invite_store::*;
pub use media_store::*;
