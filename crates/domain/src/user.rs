use crate::shared::entity::{Entity, ID};

/// A registered person. Users are created and authenticated by the
/// identity service, this service only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
