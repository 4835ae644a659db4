//! `SeaORM` implementation of the `CounterService` trait.

use crate::api::types::CounterDto;
use crate::catalog::ValidationError;
use crate::db::Store;
use crate::domain::{ContentId, ContentKind, CounterDirection, CounterField};
use crate::services::counter_service::{CounterError, CounterService};
use async_trait::async_trait;
use tracing::debug;

pub struct SeaOrmCounterService {
    store: Store,
}

impl SeaOrmCounterService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CounterService for SeaOrmCounterService {
    async fn mutate(
        &self,
        kind: ContentKind,
        id: &str,
        field: CounterField,
        direction: CounterDirection,
    ) -> Result<CounterDto, CounterError> {
        let id = ContentId::parse(id)?.as_key();
        let item_kind = kind.item_kind().ok_or_else(|| {
            ValidationError::new("kind", format!("{kind} entries have no counters"))
        })?;

        let new_count = self
            .store
            .atomic_add(item_kind, &id, field, direction.delta())
            .await
            .map_err(|e| CounterError::Database(e.to_string()))?
            .ok_or_else(|| CounterError::NotFound {
                kind,
                id: id.clone(),
            })?;

        let direction_label = match direction {
            CounterDirection::Increment => "increment",
            CounterDirection::Decrement => "decrement",
        };
        let labels = [
            ("kind", item_kind.as_str().to_string()),
            ("field", field.as_str().to_string()),
            ("direction", direction_label.to_string()),
        ];
        metrics::counter!("content_counter_mutations_total", &labels).increment(1);

        debug!(%kind, id = %id, field = field.as_str(), new_count, "Counter mutated");
        Ok(CounterDto { new_count })
    }
}
