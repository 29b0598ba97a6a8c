use super::ISymptomLogRepo;
use crate::repos::shared::inmemory_repo::*;
use sehat_saathi_domain::{SymptomLog, ID};

pub struct InMemorySymptomLogRepo {
    logs: std::sync::Mutex<Vec<SymptomLog>>,
}

impl InMemorySymptomLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISymptomLogRepo for InMemorySymptomLogRepo {
    async fn insert(&self, log: &SymptomLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<SymptomLog>> {
        Ok(find_by(&self.logs, |l| l.user_id == *user_id))
    }
}
