#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_inception
)]

pub mod api;
pub mod context;
pub mod database;
pub mod directory;
pub mod notifications;
pub mod utils;

pub use context::SharingContext;
