use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{create_reminder::*, dtos::ReminderDTO};
use sehat_saathi_domain::{Recurrence, Reminder, ID};
use sehat_saathi_infra::SehatContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        title: body.title,
        category: body.category.unwrap_or_else(|| "medicine".into()),
        date: body.date,
        time: body.time,
        recurrence: body.recurrence.unwrap_or_default(),
        dosage: body.dosage,
        enabled: body.enabled.unwrap_or(true),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(ReminderDTO::new(reminder)))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub recurrence: Recurrence,
    pub dosage: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidReminder,
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder => Self::BadClientData(
                "A reminder needs a title, a date as YYYY-MM-DD and a time as HH:MM".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            recurrence: self.recurrence.clone(),
            dosage: self.dosage.clone(),
            enabled: self.enabled,
            created: now,
            updated: now,
        };
        if !reminder.is_valid() {
            return Err(UseCaseError::InvalidReminder);
        }

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn usecase_factory(user_id: &ID) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id: user_id.clone(),
            title: "Metformin".into(),
            category: "medicine".into(),
            date: "2024-01-17".into(),
            time: "08:00".into(),
            recurrence: Recurrence::Daily,
            dosage: Some("500mg".into()),
            enabled: true,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder() {
        let ctx = SehatContext::create_inmemory();
        let user_id = ID::new();
        let mut usecase = usecase_factory(&user_id);

        let reminder = usecase.execute(&ctx).await.unwrap();
        assert!(reminder.enabled);
        assert_eq!(
            ctx.repos.reminders.find(&reminder.id).await.unwrap(),
            reminder
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_time() {
        let ctx = SehatContext::create_inmemory();
        let user_id = ID::new();
        let mut usecase = usecase_factory(&user_id);
        usecase.time = "8am".into();

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidReminder
        );
        assert!(ctx
            .repos
            .reminders
            .find_all_by_user(&user_id)
            .await
            .unwrap()
            .is_empty());
    }
}
