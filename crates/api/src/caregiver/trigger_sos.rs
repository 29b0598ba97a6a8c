use super::broadcast_sos;
use crate::{
    error::SehatError,
    notification::send_notification::SendNotificationUseCase,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{dtos::SOSAlertDTO, trigger_sos::*};
use sehat_saathi_domain::{
    Caregiver, Location, Notification, NotificationPriority, SOSAlert, User,
};
use sehat_saathi_infra::SehatContext;
use serde_json::json;
use tracing::{error, warn};

pub async fn trigger_sos_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = TriggerSOSUseCase {
        patient: user,
        location: body.0.location,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::with_message(
                SOSAlertDTO::new(res.alert),
                "SOS Alert broadcasted!",
            ))
        })
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct TriggerSOSUseCase {
    pub patient: User,
    pub location: Location,
}

#[derive(Debug)]
pub struct SOSTriggered {
    pub alert: SOSAlert,
    pub patient: User,
    /// Caregivers that are contacted about the alert
    pub contacts: Vec<Caregiver>,
}

#[derive(Debug, PartialEq)]
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
impl UseCase for TriggerSOSUseCase {
    type Response = SOSTriggered;

    type Error = UseCaseError;

    const NAME: &'static str = "TriggerSOS";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let contacts = ctx
            .repos
            .caregivers
            .find_by_patient(&self.patient.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .filter(|c| c.receives_sos())
            .collect::<Vec<_>>();

        // In a real deployment these would be phone numbers
        let emails = contacts
            .iter()
            .map(|c| c.caregiver_email.clone())
            .collect::<Vec<_>>();
        let alert = SOSAlert::new(
            self.patient.id.clone(),
            self.location.clone(),
            emails,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .sos_alerts
            .insert(&alert)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        warn!(
            "[SMS MOCK] Sending SOS to: {}",
            alert.notified_contacts.join(", ")
        );
        warn!(
            "[SMS MOCK] Message: SOS! {} needs help at {}",
            self.patient.name,
            describe_location(&alert.location)
        );

        Ok(SOSTriggered {
            alert,
            patient: self.patient.clone(),
            contacts,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(BroadcastSOSOnTriggered),
            Box::new(NotifyCaregiversOnSOSTriggered),
        ]
    }
}

fn describe_location(location: &Location) -> String {
    match &location.address {
        Some(address) => address.clone(),
        None => format!("{}, {}", location.latitude, location.longitude),
    }
}

pub struct BroadcastSOSOnTriggered;

#[async_trait::async_trait(?Send)]
impl Subscriber<TriggerSOSUseCase> for BroadcastSOSOnTriggered {
    async fn notify(&self, res: &SOSTriggered, ctx: &SehatContext) {
        broadcast_sos(
            ctx,
            &res.alert.patient_id,
            &res.alert.location,
            res.alert.trigger_time,
        );
    }
}

/// Registered caregivers also get a `Notification` so the alert reaches
/// them outside of the patient room
pub struct NotifyCaregiversOnSOSTriggered;

#[async_trait::async_trait(?Send)]
impl Subscriber<TriggerSOSUseCase> for NotifyCaregiversOnSOSTriggered {
    async fn notify(&self, res: &SOSTriggered, ctx: &SehatContext) {
        for caregiver_id in res.contacts.iter().filter_map(|c| c.caregiver_id.as_ref()) {
            let mut notification = Notification::new(
                caregiver_id.clone(),
                "SOS Alert".into(),
                format!(
                    "SOS! {} needs help at {}",
                    res.patient.name,
                    describe_location(&res.alert.location)
                ),
                res.alert.trigger_time,
            );
            notification.priority = NotificationPriority::High;
            notification.metadata = Some(json!({
                "sosAlertId": res.alert.id,
                "patientId": res.alert.patient_id,
            }));

            if let Err(e) = execute(SendNotificationUseCase { notification }, ctx).await {
                error!(
                    "Unable to notify caregiver {} about SOS {}: {:?}",
                    caregiver_id, res.alert.id, e
                );
            }
        }
    }
}
