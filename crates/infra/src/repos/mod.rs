mod caregiver;
mod notification;
mod order;
mod reminder;
mod reminder_log;
mod shared;
mod sos_alert;
mod symptom_log;
mod user;

use caregiver::{ICaregiverRepo, InMemoryCaregiverRepo, MongoCaregiverRepo};
use mongodb::{options::ClientOptions, Client};
use notification::{INotificationRepo, InMemoryNotificationRepo, MongoNotificationRepo};
use order::{IOrderRepo, InMemoryOrderRepo, MongoOrderRepo};
use reminder::{IReminderRepo, InMemoryReminderRepo, MongoReminderRepo};
use reminder_log::{IReminderLogRepo, InMemoryReminderLogRepo, MongoReminderLogRepo};
use sos_alert::{ISOSAlertRepo, InMemorySOSAlertRepo, MongoSOSAlertRepo};
use std::sync::Arc;
use symptom_log::{ISymptomLogRepo, InMemorySymptomLogRepo, MongoSymptomLogRepo};
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, MongoUserRepo};

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_logs: Arc<dyn IReminderLogRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub caregivers: Arc<dyn ICaregiverRepo>,
    pub sos_alerts: Arc<dyn ISOSAlertRepo>,
    pub symptom_logs: Arc<dyn ISymptomLogRepo>,
    pub orders: Arc<dyn IOrderRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.collection("server-start")
            .insert_one(
                mongodb::bson::doc! {
                "server-start": 1
                },
                None,
            )
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        let caregivers = MongoCaregiverRepo::new(&db);
        caregivers.create_indexes().await?;

        Ok(Self {
            users: Arc::new(MongoUserRepo::new(&db)),
            reminders: Arc::new(MongoReminderRepo::new(&db)),
            reminder_logs: Arc::new(MongoReminderLogRepo::new(&db)),
            notifications: Arc::new(MongoNotificationRepo::new(&db)),
            caregivers: Arc::new(caregivers),
            sos_alerts: Arc::new(MongoSOSAlertRepo::new(&db)),
            symptom_logs: Arc::new(MongoSymptomLogRepo::new(&db)),
            orders: Arc::new(MongoOrderRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_logs: Arc::new(InMemoryReminderLogRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            caregivers: Arc::new(InMemoryCaregiverRepo::new()),
            sos_alerts: Arc::new(InMemorySOSAlertRepo::new()),
            symptom_logs: Arc::new(InMemorySymptomLogRepo::new()),
            orders: Arc::new(InMemoryOrderRepo::new()),
        }
    }
}
