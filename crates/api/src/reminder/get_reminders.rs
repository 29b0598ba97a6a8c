use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::get_reminders::*;
use sehat_saathi_domain::{Reminder, ID};
use sehat_saathi_infra::SehatContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(to_response(reminders)))
        .map_err(|_| SehatError::InternalError)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_all_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
