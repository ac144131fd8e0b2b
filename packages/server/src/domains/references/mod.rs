pub mod activities;
pub mod error;
pub mod models;

pub use error::ReferenceError;
pub use models::{NewReference, PendingReference, ReferenceStatus};
