use super::IUserRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use sehat_saathi_domain::{User, ID};
use serde::{Deserialize, Serialize};

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::insert::<_, UserMongo>(&self.collection, user).await
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let filter = doc! { "_id": user_id.as_string() };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        // Emails are stored lowercased
        let filter = doc! { "email": email.to_lowercase() };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ID,
    name: String,
    email: String,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: self._id,
            name: self.name,
            email: self.email,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.to_lowercase(),
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
