mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

use crate::repos::shared::query_structs::TimestampRange;
use event_notifier_domain::Event;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    /// Events taking place within the range, both ends inclusive
    async fn find_by_date_range(&self, range: TimestampRange) -> anyhow::Result<Vec<Event>>;
    /// Events requiring a registration whose deadline is within the range
    async fn find_with_registration_deadline(
        &self,
        range: TimestampRange,
    ) -> anyhow::Result<Vec<Event>>;
}
