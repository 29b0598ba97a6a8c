use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::NotificationDTO, mark_notification_read::*};
use sehat_saathi_domain::{Notification, ID};
use sehat_saathi_infra::SehatContext;

pub async fn mark_notification_read_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkNotificationReadUseCase {
        user_id: user.id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(NotificationDTO::new(notification)))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("Notification not found".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .mark_read(&self.notification_id, &self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}
