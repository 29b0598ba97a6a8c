use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use sehat_saathi_api_structs::bulk_sync::*;
use sehat_saathi_domain::{
    AdherenceStatus, Order, OrderItem, ReminderLog, Severity, SymptomLog, ID,
};
use sehat_saathi_infra::SehatContext;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::warn;

pub async fn bulk_sync_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = BulkSyncUseCase {
        user_id: user.id,
        items: body.0.items,
    };

    execute(usecase, &ctx)
        .await
        .map(|results| HttpResponse::Ok().json(APIResponse::new(results)))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct BulkSyncUseCase {
    pub user_id: ID,
    pub items: Option<Value>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingItems,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingItems => Self::BadClientData("Invalid items array".into()),
        }
    }
}

/// Clients send timestamps either as unix millis or as RFC 3339 strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Millis(i64),
    Date(DateTime<Utc>),
}

impl Timestamp {
    fn millis(&self) -> i64 {
        match self {
            Self::Millis(millis) => *millis,
            Self::Date(date) => date.timestamp_millis(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymptomData {
    symptoms: Vec<String>,
    severity: Severity,
    notes: Option<String>,
    created_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderLogData {
    reminder_id: ID,
    status: AdherenceStatus,
    taken_at: Option<Timestamp>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderData {
    items: Vec<OrderItem>,
    total_amount: Option<f64>,
    created_at: Option<Timestamp>,
}

enum ItemOutcome {
    Created,
    Skipped,
}

fn parse<T: DeserializeOwned>(data: &Value) -> Result<T, String> {
    serde_json::from_value(data.clone()).map_err(|e| e.to_string())
}

impl BulkSyncUseCase {
    async fn sync_item(&self, item: &SyncItem, ctx: &SehatContext) -> Result<ItemOutcome, String> {
        let now = ctx.sys.get_timestamp_millis();
        match item.kind.as_str() {
            "symptom" => {
                let data: SymptomData = parse(&item.data)?;
                let log = SymptomLog {
                    id: Default::default(),
                    user_id: self.user_id.clone(),
                    symptoms: data.symptoms,
                    severity: data.severity,
                    notes: data.notes,
                    created: data.created_at.map(|t| t.millis()).unwrap_or(now),
                };
                if !log.is_valid() {
                    return Err("A symptom log needs at least one symptom".into());
                }
                ctx.repos
                    .symptom_logs
                    .insert(&log)
                    .await
                    .map_err(|e| e.to_string())?;
            }
            "reminder_log" => {
                let data: ReminderLogData = parse(&item.data)?;
                if ctx
                    .repos
                    .reminders
                    .find_by_user(&data.reminder_id, &self.user_id)
                    .await
                    .is_none()
                {
                    return Err(format!("Reminder {} not found", data.reminder_id));
                }
                let log = ReminderLog {
                    id: Default::default(),
                    user_id: self.user_id.clone(),
                    reminder_id: data.reminder_id,
                    status: data.status,
                    taken_at: Some(data.taken_at.map(|t| t.millis()).unwrap_or(now)),
                    notes: data.notes,
                    created: now,
                };
                ctx.repos
                    .reminder_logs
                    .insert(&log)
                    .await
                    .map_err(|e| e.to_string())?;
            }
            "order" => {
                let data: OrderData = parse(&item.data)?;
                let created = data.created_at.map(|t| t.millis()).unwrap_or(now);
                let order = Order::new(self.user_id.clone(), data.items, data.total_amount, created);
                if !order.is_valid() {
                    return Err("An order needs at least one valid item".into());
                }
                ctx.repos
                    .orders
                    .insert(&order)
                    .await
                    .map_err(|e| e.to_string())?;
            }
            kind => {
                warn!("Unknown sync item type: {}", kind);
                return Ok(ItemOutcome::Skipped);
            }
        }
        Ok(ItemOutcome::Created)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for BulkSyncUseCase {
    type Response = SyncResults;

    type Error = UseCaseError;

    const NAME: &'static str = "BulkSync";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let items = match self.items.as_ref().and_then(|items| items.as_array()) {
            Some(items) => items,
            None => return Err(UseCaseError::MissingItems),
        };

        let mut results = SyncResults::default();
        for value in items {
            let outcome = match parse::<SyncItem>(value) {
                Ok(item) => self.sync_item(&item, ctx).await,
                Err(e) => Err(format!("Invalid sync item: {}", e)),
            };
            match outcome {
                Ok(ItemOutcome::Created) => results.success += 1,
                Ok(ItemOutcome::Skipped) => results.skipped += 1,
                Err(error) => {
                    results.failed += 1;
                    results.errors.push(SyncError {
                        id: value.get("id").filter(|id| !id.is_null()).cloned(),
                        error,
                    });
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::reminder_factory;
    use sehat_saathi_domain::{OrderStatus, PaymentStatus, Recurrence};
    use sehat_saathi_infra::StaticTimeSys;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> SehatContext {
        let mut ctx = SehatContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(1705458600000));
        ctx
    }

    fn item(id: i64, kind: &str, data: Value) -> Value {
        json!({ "id": id, "type": kind, "data": data })
    }

    #[actix_web::main]
    #[test]
    async fn unknown_items_are_skipped() {
        let ctx = setup();
        let user_id = ID::new();

        let mut usecase = BulkSyncUseCase {
            user_id: user_id.clone(),
            items: Some(Value::Array(vec![
                item(1, "symptom", json!({ "symptoms": ["fever"], "severity": "mild" })),
                item(2, "vitals", json!({ "pulse": 80 })),
            ])),
        };
        let results = usecase.execute(&ctx).await.unwrap();
        assert_eq!(results.success, 1);
        assert_eq!(results.failed, 0);
        assert_eq!(results.skipped, 1);
        assert!(results.errors.is_empty());

        let logs = ctx.repos.symptom_logs.find_by_user(&user_id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].severity, Severity::Mild);
        assert_eq!(logs[0].created, 1705458600000);
    }

    #[actix_web::main]
    #[test]
    async fn invalid_items_do_not_abort_the_batch() {
        let ctx = setup();
        let user_id = ID::new();

        let mut usecase = BulkSyncUseCase {
            user_id: user_id.clone(),
            items: Some(Value::Array(vec![
                item(1, "symptom", json!({ "symptoms": [], "severity": "mild" })),
                item(2, "symptom", json!({ "symptoms": ["cough"], "severity": "unbearable" })),
                item(3, "reminder_log", json!({ "reminderId": ID::new(), "status": "taken" })),
                item(
                    4,
                    "order",
                    json!({
                        "items": [{ "name": "ORS", "quantity": 2, "price": 3.0 }],
                        "createdAt": "2024-01-16T10:00:00Z"
                    }),
                ),
            ])),
        };
        let results = usecase.execute(&ctx).await.unwrap();
        assert_eq!(results.success, 1);
        assert_eq!(results.failed, 3);
        assert_eq!(
            results.errors.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
            vec![Some(json!(1)), Some(json!(2)), Some(json!(3))]
        );

        let orders = ctx.repos.orders.find_by_user(&user_id).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].payment_status, PaymentStatus::Pending);
        assert!((orders[0].total_amount - 6.0).abs() < f64::EPSILON);
        assert_eq!(orders[0].created, 1705399200000);
    }

    #[actix_web::main]
    #[test]
    async fn reminder_logs_default_taken_at_to_now() {
        let ctx = setup();
        let user_id = ID::new();
        let reminder = reminder_factory(&user_id, Recurrence::Daily);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = BulkSyncUseCase {
            user_id: user_id.clone(),
            items: Some(Value::Array(vec![item(
                1,
                "reminder_log",
                json!({ "reminderId": reminder.id, "status": "taken", "notes": "after food" }),
            )])),
        };
        let results = usecase.execute(&ctx).await.unwrap();
        assert_eq!(results.success, 1);

        let logs = ctx
            .repos
            .reminder_logs
            .find_by_reminder(&reminder.id, &user_id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].taken_at, Some(1705458600000));
        assert_eq!(logs[0].notes, Some("after food".into()));
    }

    #[actix_web::main]
    #[test]
    async fn malformed_entries_fail_one_at_a_time() {
        let ctx = setup();
        let user_id = ID::new();

        let mut usecase = BulkSyncUseCase {
            user_id: user_id.clone(),
            items: Some(json!([
                { "id": 1, "type": "symptom", "data": { "symptoms": ["fever"], "severity": "mild" } },
                { "id": 2, "data": {} },
                null,
                "symptom"
            ])),
        };
        let results = usecase.execute(&ctx).await.unwrap();
        assert_eq!(results.success, 1);
        assert_eq!(results.failed, 3);
        assert_eq!(results.skipped, 0);
        assert_eq!(
            results.errors.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
            vec![Some(json!(2)), None, None]
        );
        assert!(results.errors[0].error.starts_with("Invalid sync item"));

        let logs = ctx.repos.symptom_logs.find_by_user(&user_id).await.unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_missing_items() {
        let ctx = setup();
        let mut usecase = BulkSyncUseCase {
            user_id: ID::new(),
            items: None,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::MissingItems
        );

        let mut usecase = BulkSyncUseCase {
            user_id: ID::new(),
            items: Some(json!({ "type": "symptom" })),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::MissingItems
        );
    }
}
