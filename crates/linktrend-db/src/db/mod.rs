//! Database repositories for the data access layer

pub mod sessions;
pub mod transactions;
pub mod users;
pub mod videos;
