mod helpers;

use helpers::setup::spawn_app;
use sehat_saathi_sdk::{
    APIErrorVariant, AdherenceStatus, CreateReminderInput, CreateReminderLogInput,
    InviteCaregiverInput, Location, Recurrence, SOSStatus, SehatSDK, SyncItem,
    UpdateReminderInput,
};
use serde_json::json;

fn metformin() -> CreateReminderInput {
    CreateReminderInput {
        title: "Metformin".into(),
        category: None,
        date: "2024-01-17".into(),
        time: "08:00".into(),
        recurrence: Some(Recurrence::Daily),
        dosage: Some("500mg".into()),
        enabled: None,
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let app = spawn_app().await;
    let sdk = SehatSDK::new(app.address.clone(), "");
    let res = sdk.status.check_health().await.expect("Expected health");
    assert_eq!(res.status, "OK");
}

#[actix_web::main]
#[test]
async fn test_rejects_unauthenticated_requests() {
    let app = spawn_app().await;
    let sdk = SehatSDK::new(app.address.clone(), "not-a-token");
    let err = sdk.reminder.get().await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Unauthorized);
    let err = sdk.notification.get().await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Unauthorized);
}

#[actix_web::main]
#[test]
async fn test_crud_reminders() {
    let app = spawn_app().await;
    let (user, sdk) = app.login("Asha", "asha@example.com").await;

    let reminder = sdk
        .reminder
        .create(metformin())
        .await
        .expect("Expected to create reminder");
    assert_eq!(reminder.user_id, user.id);
    assert_eq!(reminder.category, "medicine");
    assert!(reminder.enabled);

    let mut invalid = metformin();
    invalid.time = "8am".into();
    let err = sdk.reminder.create(invalid).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let updated = sdk
        .reminder
        .update(UpdateReminderInput {
            reminder_id: reminder.id.clone(),
            time: Some("09:30".into()),
            enabled: Some(false),
            ..Default::default()
        })
        .await
        .expect("Expected to update reminder");
    assert_eq!(updated.time, "09:30");
    assert!(!updated.enabled);
    assert_eq!(updated.title, "Metformin");

    // Other users can not see or touch the reminder
    let (_, other) = app.login("Kiran", "kiran@example.com").await;
    assert!(other.reminder.get().await.unwrap().is_empty());
    let err = other.reminder.delete(&reminder.id).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::NotFound);

    let reminders = sdk.reminder.get().await.unwrap();
    assert_eq!(reminders.len(), 1);

    sdk.reminder
        .delete(&reminder.id)
        .await
        .expect("Expected to delete reminder");
    assert!(sdk.reminder.get().await.unwrap().is_empty());
}

#[actix_web::main]
#[test]
async fn test_snooze_reminder() {
    let app = spawn_app().await;
    let (_, sdk) = app.login("Asha", "asha@example.com").await;

    let mut input = metformin();
    input.recurrence = Some(Recurrence::Once);
    let reminder = sdk.reminder.create(input).await.unwrap();

    let snoozed = sdk
        .reminder
        .snooze(&reminder.id, Some(15))
        .await
        .expect("Expected to snooze reminder");
    assert_eq!(snoozed.id, reminder.id);
    assert_ne!(snoozed.time, reminder.time);

    let err = sdk.reminder.snooze(&reminder.id, Some(-5)).await.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let err = sdk
        .reminder
        .snooze(&reminder.id, Some(1_000_000_000_000))
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_reminder_logs() {
    let app = spawn_app().await;
    let (user, sdk) = app.login("Asha", "asha@example.com").await;
    let reminder = sdk.reminder.create(metformin()).await.unwrap();

    let log = sdk
        .reminder
        .create_log(CreateReminderLogInput {
            reminder_id: reminder.id.clone(),
            status: AdherenceStatus::Taken,
            taken_at: None,
            notes: None,
        })
        .await
        .expect("Expected to create log");
    assert_eq!(log.user_id, user.id);
    assert!(log.taken_at.is_some());

    let logs = sdk.reminder.get_logs(&reminder.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, log.id);
}

#[actix_web::main]
#[test]
async fn test_bulk_sync() {
    let app = spawn_app().await;
    let (user, sdk) = app.login("Asha", "asha@example.com").await;

    let items = vec![
        SyncItem {
            id: Some(json!("local-1")),
            kind: "symptom".into(),
            data: json!({ "symptoms": ["headache"], "severity": "moderate" }),
        },
        SyncItem {
            id: Some(json!("local-2")),
            kind: "steps".into(),
            data: json!({ "count": 4000 }),
        },
        SyncItem {
            id: Some(json!("local-3")),
            kind: "order".into(),
            data: json!({ "items": [] }),
        },
    ];
    let res = sdk.sync.bulk(items).await.expect("Expected to sync");
    assert!(res.success);
    assert_eq!(res.results.success, 1);
    assert_eq!(res.results.skipped, 1);
    assert_eq!(res.results.failed, 1);
    assert_eq!(res.results.errors[0].id, Some(json!("local-3")));
    assert_eq!(res.message, "Synced 1 items. Failed: 1");

    let symptoms = app.ctx.repos.symptom_logs.find_by_user(&user.id).await.unwrap();
    assert_eq!(symptoms.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_bulk_sync_counts_malformed_entries() {
    let app = spawn_app().await;
    let (user, _) = app.login("Asha", "asha@example.com").await;

    let body = json!({
        "items": [
            { "id": 1, "type": "symptom", "data": { "symptoms": ["fever"], "severity": "mild" } },
            { "id": 2, "data": {} },
            null
        ]
    });
    let res = reqwest::Client::new()
        .post(format!("{}/api/sync/bulk", app.address))
        .bearer_auth(app.token_for(&user))
        .json(&body)
        .send()
        .await
        .expect("Expected a response");
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let res: serde_json::Value = res.json().await.unwrap();
    assert_eq!(res["results"]["success"], json!(1));
    assert_eq!(res["results"]["failed"], json!(2));
    assert_eq!(res["results"]["errors"][0]["id"], json!(2));
    assert_eq!(res["message"], json!("Synced 1 items. Failed: 2"));

    let symptoms = app.ctx.repos.symptom_logs.find_by_user(&user.id).await.unwrap();
    assert_eq!(symptoms.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_invite_caregivers() {
    let app = spawn_app().await;
    let (patient, sdk) = app.login("Asha", "asha@example.com").await;
    let (son, son_sdk) = app.login("Ravi", "ravi@example.com").await;

    let res = sdk
        .caregiver
        .invite(InviteCaregiverInput {
            email: " Ravi@Example.com ".into(),
            name: None,
            relationship: "son".into(),
            permissions: None,
        })
        .await
        .expect("Expected to invite caregiver");
    assert_eq!(res.data.caregiver_id, Some(son.id.clone()));
    assert_eq!(res.data.name, "Ravi");
    assert_eq!(res.data.caregiver_email, "ravi@example.com");

    let err = sdk
        .caregiver
        .invite(InviteCaregiverInput {
            email: "ravi@example.com".into(),
            name: None,
            relationship: "son".into(),
            permissions: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Conflict);

    let err = sdk
        .caregiver
        .invite(InviteCaregiverInput {
            email: "asha@example.com".into(),
            name: None,
            relationship: "self".into(),
            permissions: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let caregivers = sdk.caregiver.get_caregivers().await.unwrap().data;
    assert_eq!(caregivers.len(), 1);

    let patients = son_sdk.caregiver.get_patients().await.unwrap().data;
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].patient.as_ref().map(|p| p.id.clone()), Some(patient.id));
}

#[actix_web::main]
#[test]
async fn test_trigger_and_resolve_sos() {
    let app = spawn_app().await;
    let (patient, sdk) = app.login("Asha", "asha@example.com").await;
    let (_, son_sdk) = app.login("Ravi", "ravi@example.com").await;
    sdk.caregiver
        .invite(InviteCaregiverInput {
            email: "ravi@example.com".into(),
            name: None,
            relationship: "son".into(),
            permissions: None,
        })
        .await
        .unwrap();

    let location = Location {
        latitude: 28.61,
        longitude: 77.2,
        address: Some("Connaught Place".into()),
    };
    let res = sdk
        .caregiver
        .trigger_sos(location)
        .await
        .expect("Expected to trigger sos");
    let alert = res.data;
    assert_eq!(alert.patient_id, patient.id);
    assert_eq!(alert.status, SOSStatus::Active);
    assert_eq!(alert.notified_contacts, vec!["ravi@example.com".to_string()]);

    // The registered caregiver is notified
    let notifications = son_sdk.notification.get().await.unwrap();
    assert_eq!(notifications.unread_count, 1);
    assert_eq!(notifications.notifications[0].title, "SOS Alert");

    let err = son_sdk
        .caregiver
        .resolve_sos(&alert.id, SOSStatus::Resolved)
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::NotFound);

    let resolved = sdk
        .caregiver
        .resolve_sos(&alert.id, SOSStatus::Resolved)
        .await
        .expect("Expected to resolve sos")
        .data;
    assert_eq!(resolved.status, SOSStatus::Resolved);
    assert!(resolved.resolved_at.is_some());

    let err = sdk
        .caregiver
        .resolve_sos(&alert.id, SOSStatus::FalseAlarm)
        .await
        .unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::Conflict);
}
