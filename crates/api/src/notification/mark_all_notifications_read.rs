use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::mark_all_notifications_read::*;
use sehat_saathi_domain::ID;
use sehat_saathi_infra::SehatContext;

pub async fn mark_all_notifications_read_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkAllNotificationsReadUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse::new("All notifications marked as read"))
        })
        .map_err(|_| SehatError::InternalError)
}

#[derive(Debug)]
pub struct MarkAllNotificationsReadUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAllNotificationsReadUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAllNotificationsRead";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .mark_all_read(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
