//! Pricing service errors.

use bookshop::{
    activities::{ActivityId, ActivityKind, ConfigError},
    cart::DuplicateBook,
    discounts::DiscountError,
};
use thiserror::Error;

use crate::domain::RepositoryError;

/// The cart request was rejected before a price could be computed.
///
/// This is never folded into a populated result: callers see either a
/// priced cart (possibly carrying an internal error code) or a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// A book was requested more than once.
    #[error(transparent)]
    DuplicateBook(#[from] DuplicateBook),

    /// The selected activity does not exist or is outside its time window.
    #[error("{kind} activity `{activity_id}` is not active")]
    ActivityNotFound {
        /// Requested kind
        kind: ActivityKind,
        /// Requested identifier
        activity_id: ActivityId,
    },
}

/// Failures that degrade a pricing call into an internal error code.
#[derive(Debug, Error)]
pub(crate) enum StrategyError {
    #[error("activity configuration is malformed")]
    Config(#[from] ConfigError),

    #[error("price arithmetic overflowed")]
    Discount(#[from] DiscountError),

    #[error("repository lookup failed")]
    Repository(#[from] RepositoryError),

    #[error("activity snapshot could not be serialized")]
    Snapshot(#[from] serde_json::Error),
}

impl StrategyError {
    /// Short label used in logs to tell causes apart.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "activity_config",
            Self::Discount(_) => "arithmetic",
            Self::Repository(_) => "storage",
            Self::Snapshot(_) => "snapshot",
        }
    }
}
