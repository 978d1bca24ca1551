//! Domain models

pub mod session;
pub mod transaction;
pub mod user;
pub mod video;

pub use session::Session;
pub use transaction::{NewTransaction, PaymentMethod, Transaction, TransactionStatus};
pub use user::User;
pub use video::{NewVideo, Video};
