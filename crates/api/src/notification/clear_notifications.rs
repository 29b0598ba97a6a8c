use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::clear_notifications::*;
use sehat_saathi_domain::ID;
use sehat_saathi_infra::SehatContext;

pub async fn clear_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = ClearNotificationsUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse::new("All notifications cleared"))
        })
        .map_err(|_| SehatError::InternalError)
}

#[derive(Debug)]
pub struct ClearNotificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ClearNotificationsUseCase {
    /// Number of deleted notifications
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "ClearNotifications";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .delete_by_user(&self.user_id)
            .await
            .map(|res| res.deleted_count)
            .map_err(|_| UseCaseError::StorageError)
    }
}
