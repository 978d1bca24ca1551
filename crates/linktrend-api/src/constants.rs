//! API-wide constants.

/// Prefix for all API routes.
pub const API_PREFIX: &str = "/api";

/// Name of the opaque session cookie.
pub const SESSION_COOKIE: &str = "linktrend_session";
