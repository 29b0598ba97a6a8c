use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::ReminderDTO, update_reminder::*};
use sehat_saathi_domain::{Recurrence, Reminder, ID};
use sehat_saathi_infra::SehatContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        title: body.title,
        category: body.category,
        date: body.date,
        time: body.time,
        recurrence: body.recurrence,
        dosage: body.dosage,
        enabled: body.enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(ReminderDTO::new(reminder)))
        .map_err(SehatError::from)
}

#[derive(Debug, Default)]
pub struct UpdateReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub dosage: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder,
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("Reminder not found".into()),
            UseCaseError::InvalidReminder => Self::BadClientData(
                "A reminder needs a title, a date as YYYY-MM-DD and a time as HH:MM".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_user(&self.reminder_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(category) = &self.category {
            reminder.category = category.clone();
        }
        if let Some(date) = &self.date {
            reminder.date = date.clone();
        }
        if let Some(time) = &self.time {
            reminder.time = time.clone();
        }
        if let Some(recurrence) = &self.recurrence {
            reminder.recurrence = recurrence.clone();
        }
        if let Some(dosage) = &self.dosage {
            reminder.dosage = Some(dosage.clone());
        }
        if let Some(enabled) = self.enabled {
            reminder.enabled = enabled;
        }
        if !reminder.is_valid() {
            return Err(UseCaseError::InvalidReminder);
        }
        reminder.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
