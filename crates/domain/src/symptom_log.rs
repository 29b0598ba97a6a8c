use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymptomLog {
    pub id: ID,
    pub user_id: ID,
    pub symptoms: Vec<String>,
    pub severity: Severity,
    pub notes: Option<String>,
    pub created: i64,
}

impl SymptomLog {
    pub fn is_valid(&self) -> bool {
        !self.symptoms.is_empty() && self.symptoms.iter().all(|s| !s.trim().is_empty())
    }
}

impl Entity for SymptomLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
