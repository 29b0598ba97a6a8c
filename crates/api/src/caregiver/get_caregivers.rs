use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::CaregiverDTO, get_caregivers::*};
use sehat_saathi_domain::{Caregiver, ID};
use sehat_saathi_infra::SehatContext;

pub async fn get_caregivers_controller(
    http_req: HttpRequest,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetCaregiversUseCase {
        patient_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|caregivers| {
            HttpResponse::Ok().json(APIResponse::new(
                caregivers.into_iter().map(CaregiverDTO::new).collect(),
            ))
        })
        .map_err(|_| SehatError::InternalError)
}

#[derive(Debug)]
pub struct GetCaregiversUseCase {
    pub patient_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCaregiversUseCase {
    type Response = Vec<Caregiver>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCaregivers";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .caregivers
            .find_by_patient(&self.patient_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
