use super::INotificationRepo;
use crate::repos::shared::{
    mongo_repo::{self, MongoDocument},
    repo::DeleteResult,
};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use sehat_saathi_domain::{Notification, NotificationKind, NotificationPriority, ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub struct MongoNotificationRepo {
    collection: Collection<Document>,
}

impl MongoNotificationRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("notifications"),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for MongoNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        mongo_repo::insert::<_, NotificationMongo>(&self.collection, notification).await
    }

    async fn find_recent_by_user(
        &self,
        user_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<Notification>> {
        let filter = doc! { "user_id": user_id.as_string() };
        let options = FindOptions::builder()
            .sort(doc! { "created": -1 })
            .limit(limit)
            .build();
        mongo_repo::find_many_by::<_, NotificationMongo>(&self.collection, filter, Some(options))
            .await
    }

    async fn count_unread(&self, user_id: &ID) -> anyhow::Result<u64> {
        let filter = doc! {
            "user_id": user_id.as_string(),
            "is_read": false,
        };
        mongo_repo::count(&self.collection, filter).await
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        let filter = doc! {
            "_id": notification_id.as_string(),
            "user_id": user_id.as_string(),
        };
        let update = doc! { "$set": { "is_read": true } };
        mongo_repo::find_one_and_update::<_, NotificationMongo>(&self.collection, filter, update)
            .await
    }

    async fn mark_all_read(&self, user_id: &ID) -> anyhow::Result<()> {
        let filter = doc! {
            "user_id": user_id.as_string(),
            "is_read": false,
        };
        let update = doc! { "$set": { "is_read": true } };
        mongo_repo::update_many(&self.collection, filter, update).await
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let filter = doc! { "user_id": user_id.as_string() };
        mongo_repo::delete_many_by(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NotificationMongo {
    _id: ID,
    user_id: ID,
    title: String,
    message: String,
    #[serde(rename = "type")]
    kind: NotificationKind,
    priority: NotificationPriority,
    is_read: bool,
    action_url: Option<String>,
    metadata: Option<Value>,
    created: i64,
}

impl MongoDocument<Notification> for NotificationMongo {
    fn to_domain(self) -> Notification {
        Notification {
            id: self._id,
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            priority: self.priority,
            is_read: self.is_read,
            action_url: self.action_url,
            metadata: self.metadata,
            created: self.created,
        }
    }

    fn from_domain(notification: &Notification) -> Self {
        Self {
            _id: notification.id.clone(),
            user_id: notification.user_id.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            priority: notification.priority,
            is_read: notification.is_read,
            action_url: notification.action_url.clone(),
            metadata: notification.metadata.clone(),
            created: notification.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! { "_id": self._id.as_string() }
    }
}
