//! Core domain types: LDEV identifiers, blocks, and port traits

pub mod block;
pub mod ldev;
pub mod ports;

pub use block::{Block, NamedSlot, PathRole, ShareMapping};
pub use ldev::{expand_range, LdevId};
pub use ports::{CommandRunner, InventoryPipeline};
