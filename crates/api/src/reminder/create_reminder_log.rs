use crate::{
    error::SehatError,
    shared::{
        auth::protect_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use sehat_saathi_api_structs::{
    create_reminder_log::*, dtos::ReminderLogDTO, MedicationUpdatePayload, ServerMessage,
};
use sehat_saathi_domain::{AdherenceStatus, ReminderLog, ID};
use sehat_saathi_infra::{Realtime, SehatContext};
use tracing::info;

pub async fn create_reminder_log_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderLogUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        status: body.status,
        taken_at: body.taken_at,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(ReminderLogDTO::new(res.log)))
        .map_err(SehatError::from)
}

#[derive(Debug)]
pub struct CreateReminderLogUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub status: AdherenceStatus,
    pub taken_at: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct ReminderLogCreated {
    pub log: ReminderLog,
    /// Title of the logged `Reminder`
    pub medicine: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SehatError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(_) => Self::NotFound("Reminder not found".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderLogUseCase {
    type Response = ReminderLogCreated;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminderLog";

    async fn execute(&mut self, ctx: &SehatContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find_by_user(&self.reminder_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let taken_at = match (self.status, self.taken_at) {
            (_, Some(taken_at)) => Some(taken_at),
            (AdherenceStatus::Taken, None) => Some(now),
            _ => None,
        };
        let log = ReminderLog {
            id: Default::default(),
            user_id: self.user_id.clone(),
            reminder_id: reminder.id.clone(),
            status: self.status,
            taken_at,
            notes: self.notes.clone(),
            created: now,
        };

        ctx.repos
            .reminder_logs
            .insert(&log)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ReminderLogCreated {
            log,
            medicine: reminder.title,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(BroadcastMedicationUpdateOnLogCreated)]
    }
}

/// Lets the caregivers watching the patient follow adherence live
pub struct BroadcastMedicationUpdateOnLogCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReminderLogUseCase> for BroadcastMedicationUpdateOnLogCreated {
    async fn notify(&self, res: &ReminderLogCreated, ctx: &SehatContext) {
        let update = MedicationUpdatePayload {
            patient_id: res.log.user_id.clone(),
            medicine: res.medicine.clone(),
            status: res.log.status.as_str().into(),
        };
        info!(
            "Medication update for {}: {} - {}",
            update.patient_id, update.medicine, update.status
        );
        let frame = ServerMessage::PatientMedicationUpdate(update).to_frame();
        ctx.realtime
            .patients
            .publish(&Realtime::patient_room(&res.log.user_id), &frame);
    }
}
