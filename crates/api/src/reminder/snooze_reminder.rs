use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::ReminderDTO, snooze_reminder::*};
use sehat_saathi_domain::{Reminder, DEFAULT_SNOOZE_MINUTES, ID, MAX_SNOOZE_MINUTES};
use sehat_saathi_infra::SehatContext;

pub async fn snooze_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let duration = body.and_then(|body| body.0.duration);
    let usecase = SnoozeReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        // A zero duration means the default as well
        duration_minutes: match duration {
            Some(d) if d != 0 => d,
            _ => DEFAULT_SNOOZE_MINUTES,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(ReminderDTO::new(reminder)))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub duration_minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidDuration(i64),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("Reminder not found".into()),
            UseCaseError::InvalidDuration(d) => Self::BadClientData(format!(
                "Snooze duration must be between 1 and {} minutes, got: {}",
                MAX_SNOOZE_MINUTES, d
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        if self.duration_minutes <= 0 || self.duration_minutes > MAX_SNOOZE_MINUTES {
            return Err(UseCaseError::InvalidDuration(self.duration_minutes));
        }
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_user(&self.reminder_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        // Same clock as the reminder job so the snoozed reminder is picked up
        let clock = ctx.sys.read_clock(&ctx.config.reminder_timezone);
        reminder
            .snooze(&clock.now, self.duration_minutes)
            .ok_or(UseCaseError::InvalidDuration(self.duration_minutes))?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
