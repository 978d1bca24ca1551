//! Linktrend Database Library
//!
//! Postgres repositories for the catalog, users, payment requests, and
//! sessions. Each repository owns a specific domain entity and provides CRUD
//! operations and specialized queries.

pub mod db;

pub use db::sessions::SessionRepository;
pub use db::transactions::TransactionRepository;
pub use db::users::UserRepository;
pub use db::videos::VideoRepository;
