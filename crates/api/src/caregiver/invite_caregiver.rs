use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::CaregiverDTO, invite_caregiver::*};
use sehat_saathi_domain::{Caregiver, CaregiverPermissions, CaregiverStatus, User};
use sehat_saathi_infra::SehatContext;
use tracing::info;

pub async fn invite_caregiver_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = InviteCaregiverUseCase {
        patient: user,
        email: body.email,
        name: body.name,
        relationship: body.relationship,
        permissions: body.permissions.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|caregiver| {
            HttpResponse::Created().json(APIResponse::with_message(
                CaregiverDTO::new(caregiver),
                "Invitation sent successfully.",
            ))
        })
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct InviteCaregiverUseCase {
    pub patient: User,
    pub email: String,
    pub name: Option<String>,
    pub relationship: String,
    pub permissions: CaregiverPermissions,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingEmail,
    CannotInviteSelf,
    AlreadyInvited(String),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingEmail => {
                Self::BadClientData("The email of the caregiver is required.".into())
            }
            UseCaseError::CannotInviteSelf => {
                Self::BadClientData("You cannot invite yourself as a caregiver.".into())
            }
            UseCaseError::AlreadyInvited(email) => {
                Self::Conflict(format!("{} is already invited as a caregiver.", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

const PENDING_CAREGIVER_NAME: &str = "Pending Caregiver";

#[async_trait::async_trait(?Send)]
impl UseCase for InviteCaregiverUseCase {
    type Response = Caregiver;

    type Error = UseCaseError;

    const NAME: &'static str = "InviteCaregiver";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(UseCaseError::MissingEmail);
        }
        if email.eq_ignore_ascii_case(&self.patient.email) {
            return Err(UseCaseError::CannotInviteSelf);
        }
        if ctx
            .repos
            .caregivers
            .find_by_patient_and_email(&self.patient.id, &email)
            .await
            .is_some()
        {
            return Err(UseCaseError::AlreadyInvited(email));
        }

        let registered_user = ctx.repos.users.find_by_email(&email).await;
        let name = registered_user
            .as_ref()
            .map(|u| u.name.clone())
            .or_else(|| self.name.clone().filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| PENDING_CAREGIVER_NAME.into());

        let caregiver = Caregiver {
            id: Default::default(),
            patient_id: self.patient.id.clone(),
            caregiver_id: registered_user.map(|u| u.id),
            caregiver_email: email,
            name,
            relationship: self.relationship.clone(),
            permissions: self.permissions,
            status: CaregiverStatus::Pending,
            created: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .caregivers
            .insert(&caregiver)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        info!(
            "[Email MOCK] Sending caregiver invitation from {} to {}",
            self.patient.name, caregiver.caregiver_email
        );

        Ok(caregiver)
    }
}
