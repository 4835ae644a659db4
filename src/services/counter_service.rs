use crate::api::types::CounterDto;
use crate::catalog::ValidationError;
use crate::domain::{ContentKind, CounterDirection, CounterField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} {id} not found")]
    NotFound { kind: ContentKind, id: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CounterError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Engagement counters on catalog items.
///
/// Implementations must never read a counter and write it back: every
/// mutation is a single atomic statement so concurrent requests add up.
#[async_trait::async_trait]
pub trait CounterService: Send + Sync {
    /// Moves a view or like counter by one and returns the new value.
    ///
    /// A decrement of a counter already at zero leaves it at zero.
    ///
    /// # Errors
    ///
    /// - Returns [`CounterError::Validation`] for a malformed id or a kind without counters
    /// - Returns [`CounterError::NotFound`] if the item does not exist
    /// - Returns [`CounterError::Database`] on connection failures
    async fn mutate(
        &self,
        kind: ContentKind,
        id: &str,
        field: CounterField,
        direction: CounterDirection,
    ) -> Result<CounterDto, CounterError>;
}
