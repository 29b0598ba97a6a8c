use super::{Channel, Connection};
use crate::caregiver::{broadcast_sos, can_watch_patient};
use sehat_saathi_api_structs::{ClientMessage, ServerMessage};
use sehat_saathi_infra::{Realtime, RoomRegistry, SehatContext};
use tracing::{info, warn};

/// Patient rooms followed by the patient and their caregivers
pub struct CaregiverChannel;

fn forbidden(reason: &str) -> Option<ServerMessage> {
    Some(ServerMessage::Error(reason.into()))
}

#[async_trait::async_trait(?Send)]
impl Channel for CaregiverChannel {
    const NAME: &'static str = "caregiver";

    fn registry(realtime: &Realtime) -> &RoomRegistry {
        &realtime.patients
    }

    async fn handle(
        connection: &Connection,
        ctx: &SehatContext,
        msg: ClientMessage,
    ) -> Option<ServerMessage> {
        let user = &connection.user;
        match msg {
            ClientMessage::JoinPatientRoom(patient_id) => {
                if !can_watch_patient(ctx, user, &patient_id).await {
                    warn!("User {} may not follow patient {}", user.id, patient_id);
                    return forbidden("Not allowed to follow this patient");
                }
                let room = Realtime::patient_room(&patient_id);
                if Self::registry(&ctx.realtime).join(&room, &connection.id, connection.sender.clone())
                {
                    info!("User {} joined room: {}", user.id, room);
                }
                None
            }
            ClientMessage::TriggerSos(payload) => {
                if payload.patient_id != user.id {
                    return forbidden("Only the patient can trigger an SOS");
                }
                broadcast_sos(
                    ctx,
                    &payload.patient_id,
                    &payload.location,
                    ctx.sys.get_timestamp_millis(),
                );
                None
            }
            ClientMessage::MedicationUpdate(payload) => {
                if payload.patient_id != user.id {
                    return forbidden("Only the patient can report medication updates");
                }
                let room = Realtime::patient_room(&payload.patient_id);
                let frame = ServerMessage::PatientMedicationUpdate(payload).to_frame();
                Self::registry(&ctx.realtime).publish(&room, &frame);
                None
            }
            ClientMessage::JoinCheck(_) => forbidden("Event not supported on this channel"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caregiver::test_helpers::caregiver_factory;
    use crate::realtime::test_helpers::connection;
    use futures::StreamExt;
    use sehat_saathi_api_structs::{MedicationUpdatePayload, TriggerSOSPayload};
    use sehat_saathi_domain::{CaregiverStatus, Location, User};

    async fn setup() -> (SehatContext, User, User) {
        let ctx = SehatContext::create_inmemory();
        let patient = User::new("Asha", "asha@example.com");
        let son = User::new("Ravi", "ravi@example.com");
        let caregiver = caregiver_factory(
            &patient.id,
            &son.email,
            Some(son.id.clone()),
            CaregiverStatus::Active,
        );
        ctx.repos.caregivers.insert(&caregiver).await.unwrap();
        (ctx, patient, son)
    }

    #[actix_web::main]
    #[test]
    async fn caregivers_follow_patients_and_receive_sos() {
        let (ctx, patient, son) = setup().await;
        let (son_conn, mut son_receiver) = connection(&son);
        let (patient_conn, _patient_receiver) = connection(&patient);

        let reply = CaregiverChannel::handle(
            &son_conn,
            &ctx,
            ClientMessage::JoinPatientRoom(patient.id.clone()),
        )
        .await;
        assert_eq!(reply, None);

        let location = Location {
            latitude: 28.61,
            longitude: 77.2,
            address: None,
        };
        let reply = CaregiverChannel::handle(
            &patient_conn,
            &ctx,
            ClientMessage::TriggerSos(TriggerSOSPayload {
                patient_id: patient.id.clone(),
                location: location.clone(),
            }),
        )
        .await;
        assert_eq!(reply, None);

        let frame = son_receiver.next().await.unwrap();
        match serde_json::from_str::<ServerMessage>(&frame).unwrap() {
            ServerMessage::SosAlert(payload) => {
                assert_eq!(payload.patient_id, patient.id);
                assert_eq!(payload.location, location);
            }
            msg => panic!("Unexpected frame: {:?}", msg),
        }

        let update = MedicationUpdatePayload {
            patient_id: patient.id.clone(),
            medicine: "Metformin".into(),
            status: "taken".into(),
        };
        CaregiverChannel::handle(
            &patient_conn,
            &ctx,
            ClientMessage::MedicationUpdate(update.clone()),
        )
        .await;
        let frame = son_receiver.next().await.unwrap();
        assert_eq!(
            serde_json::from_str::<ServerMessage>(&frame).unwrap(),
            ServerMessage::PatientMedicationUpdate(update)
        );
    }

    #[actix_web::main]
    #[test]
    async fn strangers_can_not_follow_or_trigger() {
        let (ctx, patient, _) = setup().await;
        let stranger = User::new("Kiran", "kiran@example.com");
        let (conn, _receiver) = connection(&stranger);

        let reply = CaregiverChannel::handle(
            &conn,
            &ctx,
            ClientMessage::JoinPatientRoom(patient.id.clone()),
        )
        .await;
        assert!(matches!(reply, Some(ServerMessage::Error(_))));
        assert_eq!(
            ctx.realtime
                .patients
                .member_count(&Realtime::patient_room(&patient.id)),
            0
        );

        let reply = CaregiverChannel::handle(
            &conn,
            &ctx,
            ClientMessage::TriggerSos(TriggerSOSPayload {
                patient_id: patient.id.clone(),
                location: Location {
                    latitude: 0.0,
                    longitude: 0.0,
                    address: None,
                },
            }),
        )
        .await;
        assert!(matches!(reply, Some(ServerMessage::Error(_))));
    }
}
