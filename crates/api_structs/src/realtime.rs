//! Frames exchanged over the websocket channels. Every frame is a JSON
//! text message of the form `{"event": <name>, "data": <payload>}`.
use crate::dtos::NotificationDTO;
use sehat_saathi_domain::{Location, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSOSPayload {
    pub patient_id: ID,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdatePayload {
    pub patient_id: ID,
    pub medicine: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SOSAlertPayload {
    pub patient_id: ID,
    pub location: Location,
    /// ISO 8601
    pub timestamp: String,
    pub message: String,
}

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to the private notification room of the given user
    JoinCheck(ID),
    /// Subscribe to the caregiver room of the given patient
    JoinPatientRoom(ID),
    TriggerSos(TriggerSOSPayload),
    MedicationUpdate(MedicationUpdatePayload),
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    Notification(NotificationDTO),
    SosAlert(SOSAlertPayload),
    PatientMedicationUpdate(MedicationUpdatePayload),
    Error(String),
}

impl ServerMessage {
    pub fn to_frame(&self) -> String {
        // Serializing these types can not fail, all map keys are strings
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_frames() {
        let id = ID::default();
        let frame = format!(r#"{{"event":"join_check","data":"{}"}}"#, id);
        let msg: ClientMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(msg, ClientMessage::JoinCheck(id.clone()));

        let frame = format!(
            r#"{{"event":"medication_update","data":{{"patientId":"{}","medicine":"Metformin","status":"taken"}}}}"#,
            id
        );
        let msg: ClientMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            msg,
            ClientMessage::MedicationUpdate(MedicationUpdatePayload {
                patient_id: id,
                medicine: "Metformin".into(),
                status: "taken".into(),
            })
        );

        assert!(serde_json::from_str::<ClientMessage>(r#"{"event":"dance","data":1}"#).is_err());
    }

    #[test]
    fn writes_server_frames() {
        let frame = ServerMessage::Error("Not allowed".into()).to_frame();
        assert_eq!(frame, r#"{"event":"error","data":"Not allowed"}"#);
    }
}
