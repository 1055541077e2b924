//! Error taxonomy for planning calls

use thiserror::Error;

/// Failure modes of one planning request.
///
/// Every variant is recoverable at the call site. Planning is all-or-nothing:
/// no partial or best-effort timeline is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Rejected before any matrix fetch or search begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The travel-time provider failed or timed out. Propagated unchanged,
    /// never retried here.
    #[error("travel time matrix unavailable: {0}")]
    MatrixUnavailable(#[source] anyhow::Error),

    /// The search completed but no ordering satisfies every fixed start
    /// time, or a required leg is unreachable in every order. A normal
    /// outcome, distinct from a provider failure.
    #[error("no feasible route honors all fixed start times")]
    NoFeasibleRoute,
}
