use super::ISOSAlertRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{SOSAlert, ID};

pub struct InMemorySOSAlertRepo {
    alerts: std::sync::Mutex<Vec<SOSAlert>>,
}

impl InMemorySOSAlertRepo {
    pub fn new() -> Self {
        Self {
            alerts: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISOSAlertRepo for InMemorySOSAlertRepo {
    async fn insert(&self, alert: &SOSAlert) -> anyhow::Result<()> {
        insert(alert, &self.alerts);
        Ok(())
    }

    async fn save(&self, alert: &SOSAlert) -> anyhow::Result<()> {
        save(alert, &self.alerts);
        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<SOSAlert> {
        find(alert_id, &self.alerts)
    }
}
