// HTTP middleware
pub mod caller;

pub use caller::*;
