//! Linktrend Storage Library
//!
//! Storage abstraction and implementations for uploaded media. The `Storage`
//! trait covers exactly what the catalog needs from the outside world: put a
//! blob under a key and get back a public URL, delete a blob by key.
//!
//! # Storage key format
//!
//! Keys are `videos/{timestamp}_{filename}` or
//! `thumbnails/{timestamp}_{filename}`. Keys must not contain `..` or a
//! leading `/`; filename sanitization is centralized in the `keys` module so
//! all backends stay consistent.

pub mod bunny;
pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use bunny::BunnyStorage;
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
