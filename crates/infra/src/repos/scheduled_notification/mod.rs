mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduledNotificationRepo;
pub use postgres::PostgresScheduledNotificationRepo;

use event_notifier_domain::{ScheduledNotificationRecord, ID};

/// Ledger of already sent reminders keyed by (user id, event id).
///
/// There is no compare and swap, two processes doing a read - modify - write
/// on the same pair at the same time can both end up sending.
#[async_trait::async_trait]
pub trait IScheduledNotificationRepo: Send + Sync {
    async fn find(
        &self,
        user_id: &ID,
        event_id: &ID,
    ) -> anyhow::Result<Option<ScheduledNotificationRecord>>;
    /// Inserts or replaces the record of the pair
    async fn save(&self, record: &ScheduledNotificationRecord) -> anyhow::Result<()>;
}
