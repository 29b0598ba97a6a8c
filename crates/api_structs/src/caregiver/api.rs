use crate::dtos::{CaregiverDTO, PatientCareDTO, SOSAlertDTO};
use sehat_saathi_domain::{CaregiverPermissions, Location, SOSStatus, ID};
use serde::{Deserialize, Serialize};

/// Envelope used by the caregiver endpoints
#[derive(Debug, Deserialize, Serialize)]
pub struct CaregiverAPIResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> CaregiverAPIResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

pub mod invite_caregiver {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub name: Option<String>,
        #[serde(default)]
        pub relationship: String,
        pub permissions: Option<CaregiverPermissions>,
    }

    pub type APIResponse = CaregiverAPIResponse<CaregiverDTO>;
}

pub mod get_caregivers {
    use super::*;

    pub type APIResponse = CaregiverAPIResponse<Vec<CaregiverDTO>>;
}

pub mod get_patients {
    use super::*;

    pub type APIResponse = CaregiverAPIResponse<Vec<PatientCareDTO>>;
}

pub mod trigger_sos {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub location: Location,
    }

    pub type APIResponse = CaregiverAPIResponse<SOSAlertDTO>;
}

pub mod resolve_sos {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub alert_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub status: SOSStatus,
    }

    pub type APIResponse = CaregiverAPIResponse<SOSAlertDTO>;
}
