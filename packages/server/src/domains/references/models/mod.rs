pub mod pending_reference;

pub use pending_reference::{NewReference, PendingReference, ReferenceStatus};
