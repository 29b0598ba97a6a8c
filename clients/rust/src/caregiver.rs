use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sehat_saathi_api_structs::*;
use sehat_saathi_domain::{CaregiverPermissions, Location, SOSStatus, ID};
use std::sync::Arc;

#[derive(Clone)]
pub struct CaregiverClient {
    base: Arc<BaseClient>,
}

pub struct InviteCaregiverInput {
    pub email: String,
    pub name: Option<String>,
    pub relationship: String,
    /// Every permission is granted when not given
    pub permissions: Option<CaregiverPermissions>,
}

impl CaregiverClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn invite(
        &self,
        input: InviteCaregiverInput,
    ) -> APIResponse<invite_caregiver::APIResponse> {
        let body = invite_caregiver::RequestBody {
            email: input.email,
            name: input.name,
            relationship: input.relationship,
            permissions: input.permissions,
        };
        self.base
            .post(body, "api/caregivers/invite".into(), StatusCode::CREATED)
            .await
    }

    /// Caregivers of the authenticated user
    pub async fn get_caregivers(&self) -> APIResponse<get_caregivers::APIResponse> {
        self.base.get("api/caregivers".into(), StatusCode::OK).await
    }

    /// Patients the authenticated user cares for
    pub async fn get_patients(&self) -> APIResponse<get_patients::APIResponse> {
        self.base
            .get("api/caregivers/patients".into(), StatusCode::OK)
            .await
    }

    pub async fn trigger_sos(&self, location: Location) -> APIResponse<trigger_sos::APIResponse> {
        let body = trigger_sos::RequestBody { location };
        self.base
            .post(body, "api/caregivers/sos".into(), StatusCode::OK)
            .await
    }

    pub async fn resolve_sos(
        &self,
        alert_id: &ID,
        status: SOSStatus,
    ) -> APIResponse<resolve_sos::APIResponse> {
        let body = resolve_sos::RequestBody { status };
        self.base
            .put(
                body,
                format!("api/caregivers/sos/{}/resolve", alert_id),
                StatusCode::OK,
            )
            .await
    }
}
