//! HTTP request handlers

pub mod auth;
pub mod transactions;
pub mod uploads;
pub mod users;
pub mod videos;
