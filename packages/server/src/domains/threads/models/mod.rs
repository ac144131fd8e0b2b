pub mod thread;

pub use thread::{NewThread, SubmittedThread};
