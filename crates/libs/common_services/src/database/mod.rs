mod error;
mod memory_store;
mod pg_store;
mod record_store;
mod utils;

pub mod stores;
pub mod tables;

pub use error::*;
pub use memory_store::*;
pub use pg_store::*;
pub use record_store::*;
pub use stores::*;
pub use tables::*;
pub use utils::*;
