use thiserror::Error;

use crate::common::ReferenceId;
use crate::domains::references::models::ReferenceStatus;

/// Failures of a pending-reference lifecycle operation.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference {0} not found")]
    NotFound(ReferenceId),

    #[error("reference {id} is {status}, only pending references can change")]
    NotPending {
        id: ReferenceId,
        status: ReferenceStatus,
    },

    #[error("source url must not be empty")]
    EmptySourceUrl,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
