use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::SOSAlertDTO, resolve_sos::*};
use sehat_saathi_domain::{SOSAlert, SOSStatus, ID};
use sehat_saathi_infra::SehatContext;

pub async fn resolve_sos_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = ResolveSOSUseCase {
        patient_id: user.id,
        alert_id: path_params.alert_id.clone(),
        status: body.0.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|alert| HttpResponse::Ok().json(APIResponse::new(SOSAlertDTO::new(alert))))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct ResolveSOSUseCase {
    pub patient_id: ID,
    pub alert_id: ID,
    pub status: SOSStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidStatus,
    AlreadyClosed(ID),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("SOS alert not found".into()),
            UseCaseError::InvalidStatus => Self::BadClientData(
                "An SOS alert can only be closed as resolved or false_alarm".into(),
            ),
            UseCaseError::AlreadyClosed(id) => {
                Self::Conflict(format!("The SOS alert with id: {} is already closed", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResolveSOSUseCase {
    type Response = SOSAlert;

    type Error = UseCaseError;

    const NAME: &'static str = "ResolveSOS";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        if self.status == SOSStatus::Active {
            return Err(UseCaseError::InvalidStatus);
        }
        let mut alert = match ctx.repos.sos_alerts.find(&self.alert_id).await {
            Some(alert) if alert.patient_id == self.patient_id => alert,
            _ => return Err(UseCaseError::NotFound(self.alert_id.clone())),
        };

        if !alert.resolve(self.status, ctx.sys.get_timestamp_millis()) {
            return Err(UseCaseError::AlreadyClosed(alert.id));
        }
        ctx.repos
            .sos_alerts
            .save(&alert)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(alert)
    }
}
