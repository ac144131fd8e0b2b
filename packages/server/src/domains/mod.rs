// Business domains
pub mod reconciliation;
pub mod references;
pub mod threads;
pub mod votes;
