pub mod health;
pub mod references;
pub mod threads;
pub mod votes;

pub use health::*;
pub use references::*;
pub use threads::*;
pub use votes::*;
