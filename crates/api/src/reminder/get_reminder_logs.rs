use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::ReminderLogDTO, get_reminder_logs::*};
use sehat_saathi_domain::{ReminderLog, ID};
use sehat_saathi_infra::SehatContext;

pub async fn get_reminder_logs_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderLogsUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|logs| {
            let logs: APIResponse = logs.into_iter().map(ReminderLogDTO::new).collect();
            HttpResponse::Ok().json(logs)
        })
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct GetReminderLogsUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("Reminder not found".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderLogsUseCase {
    type Response = Vec<ReminderLog>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderLogs";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .reminders
            .find_by_user(&self.reminder_id, &self.user_id)
            .await
            .is_none()
        {
            return Err(UseCaseError::NotFound(self.reminder_id.clone()));
        }

        ctx.repos
            .reminder_logs
            .find_by_reminder(&self.reminder_id, &self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
