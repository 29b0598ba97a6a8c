use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::get_notifications::*;
use sehat_saathi_domain::{Notification, ID};
use sehat_saathi_infra::SehatContext;

pub async fn get_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationsUseCase {
        user_id: user.id,
        limit: ctx.config.notifications_page_size,
    };

    execute(usecase, &ctx)
        .await
        .map(|(notifications, unread_count)| {
            HttpResponse::Ok().json(APIResponse::new(notifications, unread_count))
        })
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user_id: ID,
    pub limit: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    /// The most recent notifications and the total unread count
    type Response = (Vec<Notification>, u64);

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let notifications = ctx
            .repos
            .notifications
            .find_recent_by_user(&self.user_id, self.limit)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let unread_count = ctx
            .repos
            .notifications
            .count_unread(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((notifications, unread_count))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn counts_unread_beyond_the_page() {
        let ctx = SehatContext::create_inmemory();
        let user_id = ID::new();
        for created in 0..5 {
            let n = Notification::new(user_id.clone(), "t".into(), "m".into(), created);
            ctx.repos.notifications.insert(&n).await.unwrap();
        }

        let mut usecase = GetNotificationsUseCase {
            user_id: user_id.clone(),
            limit: 2,
        };
        let (notifications, unread) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].created, 4);
        assert_eq!(unread, 5);
    }
}
