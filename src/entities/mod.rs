//! Entity module - `SeaORM` entity definitions for the local database.
//! The application keeps all of its state in a single key/value table.

/// Key/value rows holding one JSON slice each
pub mod storage;

pub use storage::{Column as StorageColumn, Entity as Storage, Model as StorageModel};
