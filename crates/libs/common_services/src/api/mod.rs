pub mod album;
pub mod collaborators;
pub mod family;
pub mod folder;
pub mod invite;
pub mod sharing;
