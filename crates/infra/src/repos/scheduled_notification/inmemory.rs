use super::IScheduledNotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use event_notifier_domain::{ScheduledNotificationRecord, ID};

pub struct InMemoryScheduledNotificationRepo {
    records: std::sync::Mutex<Vec<ScheduledNotificationRecord>>,
}

impl InMemoryScheduledNotificationRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledNotificationRepo for InMemoryScheduledNotificationRepo {
    async fn find(
        &self,
        user_id: &ID,
        event_id: &ID,
    ) -> anyhow::Result<Option<ScheduledNotificationRecord>> {
        Ok(find_one_by(&self.records, |r| {
            r.user_id == *user_id && r.event_id == *event_id
        }))
    }

    async fn save(&self, record: &ScheduledNotificationRecord) -> anyhow::Result<()> {
        upsert_by(record, &self.records, |r| {
            r.user_id == record.user_id && r.event_id == record.event_id
        });
        Ok(())
    }
}
