use super::IEventRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::TimestampRange};
use event_notifier_domain::Event;

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        upsert(e, &self.events);
        Ok(())
    }

    async fn find_by_date_range(&self, range: TimestampRange) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |e| range.contains(e.event_date)))
    }

    async fn find_with_registration_deadline(
        &self,
        range: TimestampRange,
    ) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |e| {
            e.requires_registration
                && e.registration_deadline
                    .map(|deadline| range.contains(deadline))
                    .unwrap_or(false)
        }))
    }
}
