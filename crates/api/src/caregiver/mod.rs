mod get_caregivers;
mod get_patients;
mod invite_caregiver;
mod resolve_sos;
mod trigger_sos;

use actix_web::web;
use chrono::{DateTime, SecondsFormat, Utc};
use get_caregivers::get_caregivers_controller;
use get_patients::get_patients_controller;
use invite_caregiver::invite_caregiver_controller;
use resolve_sos::resolve_sos_controller;
use sehat_saathi_api_structs::{SOSAlertPayload, ServerMessage};
use sehat_saathi_domain::{Location, User, ID, SOS_EMERGENCY_MESSAGE};
use sehat_saathi_infra::{Realtime, SehatContext};
use tracing::{error, warn};
use trigger_sos::trigger_sos_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/caregivers/invite",
        web::post().to(invite_caregiver_controller),
    );
    cfg.route("/caregivers", web::get().to(get_caregivers_controller));
    cfg.route(
        "/caregivers/patients",
        web::get().to(get_patients_controller),
    );
    cfg.route("/caregivers/sos", web::post().to(trigger_sos_controller));
    cfg.route(
        "/caregivers/sos/{alert_id}/resolve",
        web::put().to(resolve_sos_controller),
    );
}

/// Pushes an `sos_alert` to every caregiver connection in the patient room
/// and returns how many connections received it
pub fn broadcast_sos(ctx: &SehatContext, patient_id: &ID, location: &Location, at: i64) -> usize {
    warn!("SOS Alert triggered for patient {}", patient_id);
    let timestamp = DateTime::<Utc>::from_timestamp_millis(at)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let frame = ServerMessage::SosAlert(SOSAlertPayload {
        patient_id: patient_id.clone(),
        location: location.clone(),
        timestamp,
        message: SOS_EMERGENCY_MESSAGE.into(),
    })
    .to_frame();
    ctx.realtime
        .patients
        .publish(&Realtime::patient_room(patient_id), &frame)
}

/// A user can follow a patient room if it is the patient or a caregiver
/// of the patient that has not rejected the invitation
pub async fn can_watch_patient(ctx: &SehatContext, user: &User, patient_id: &ID) -> bool {
    if user.id == *patient_id {
        return true;
    }
    match ctx.repos.caregivers.find_by_patient(patient_id).await {
        Ok(caregivers) => caregivers
            .iter()
            .any(|c| c.is_watched_by(&user.id, &user.email)),
        Err(e) => {
            error!("Unable to load caregivers of patient {}: {:?}", patient_id, e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use sehat_saathi_domain::{Caregiver, CaregiverStatus, ID};

    pub fn caregiver_factory(
        patient_id: &ID,
        email: &str,
        caregiver_id: Option<ID>,
        status: CaregiverStatus,
    ) -> Caregiver {
        Caregiver {
            id: Default::default(),
            patient_id: patient_id.clone(),
            caregiver_id,
            caregiver_email: email.into(),
            name: "Ravi".into(),
            relationship: "son".into(),
            permissions: Default::default(),
            status,
            created: 0,
        }
    }
}
