use crate::{
    date::{format_date, format_time, is_valid_date, is_valid_time, parse_date},
    shared::entity::{Entity, ID},
};
use chrono::{prelude::*, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How a `Reminder` repeats after its anchor `date`.
///
/// Kinds this version does not know about are kept as `Unknown` so that
/// stored documents survive a round trip. They never fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    Once,
    Daily,
    Weekly,
    Monthly,
    Unknown(String),
}

impl From<String> for Recurrence {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "once" => Self::Once,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Unknown(kind),
        }
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> Self {
        match recurrence {
            Recurrence::Once => "once".into(),
            Recurrence::Daily => "daily".into(),
            Recurrence::Weekly => "weekly".into(),
            Recurrence::Monthly => "monthly".into(),
            Recurrence::Unknown(kind) => kind,
        }
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::Once
    }
}

/// A `Reminder` is a user defined point in time at which the owning
/// user should be told to take a medicine, go to an appointment etc.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The user owning this `Reminder` and receiving its notifications
    pub user_id: ID,
    pub title: String,
    /// Free form label, e.g. "medicine" or "appointment"
    pub category: String,
    /// Anchor calendar date as `YYYY-MM-DD`
    pub date: String,
    /// Time of day as zero padded `HH:MM`. It is matched as an exact
    /// string against the reminder job clock.
    pub time: String,
    pub recurrence: Recurrence,
    pub dosage: Option<String>,
    pub enabled: bool,
    pub created: i64,
    pub updated: i64,
}

pub const DEFAULT_SNOOZE_MINUTES: i64 = 10;

/// Snoozing further than a year ahead is rejected
pub const MAX_SNOOZE_MINUTES: i64 = 365 * 24 * 60;

impl Reminder {
    /// Decides if this `Reminder` fires on the day of `now`. The time of day
    /// is expected to already have been matched by the caller.
    pub fn fires(&self, now: &DateTime<Tz>) -> bool {
        match &self.recurrence {
            Recurrence::Once => self.date == format_date(now),
            Recurrence::Daily => true,
            // Only the weekday is compared, every week after the anchor date matches
            Recurrence::Weekly => match parse_date(&self.date) {
                Some(anchor) => anchor.weekday() == now.weekday(),
                None => false,
            },
            Recurrence::Monthly => match parse_date(&self.date) {
                Some(anchor) => anchor.day() == now.day(),
                None => false,
            },
            Recurrence::Unknown(_) => false,
        }
    }

    /// Moves the `Reminder` to `duration_minutes` after `now`.
    ///
    /// Returns `None` and leaves the `Reminder` untouched when the duration is
    /// not positive or exceeds `MAX_SNOOZE_MINUTES`.
    pub fn snooze(&mut self, now: &DateTime<Tz>, duration_minutes: i64) -> Option<()> {
        if duration_minutes <= 0 || duration_minutes > MAX_SNOOZE_MINUTES {
            return None;
        }
        let target = now
            .clone()
            .checked_add_signed(Duration::minutes(duration_minutes))?;
        self.time = format_time(&target);
        if self.recurrence == Recurrence::Once {
            self.date = format_date(&target);
        }
        self.updated = now.timestamp_millis();
        Some(())
    }

    /// A `Reminder` needs a title and a well formed anchor date and time of day
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && is_valid_date(&self.date) && is_valid_time(&self.time)
    }

    pub fn notification_message(&self) -> String {
        match &self.dosage {
            Some(dosage) => format!("It's time for: {} ({})", self.title, dosage),
            None => format!("It's time for: {}", self.title),
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory(recurrence: Recurrence, date: &str) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: Default::default(),
            title: "Metformin".into(),
            category: "medicine".into(),
            date: date.into(),
            time: "08:00".into(),
            recurrence,
            dosage: Some("500mg".into()),
            enabled: true,
            created: 0,
            updated: 0,
        }
    }

    fn at(date: &str, time: &str) -> DateTime<Tz> {
        let naive = NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M")
            .expect("Valid datetime");
        chrono_tz::UTC.from_utc_datetime(&naive)
    }

    #[test]
    fn daily_fires_regardless_of_date() {
        let reminder = reminder_factory(Recurrence::Daily, "2030-06-01");
        assert!(reminder.fires(&at("2024-01-17", "08:00")));
        assert!(reminder.fires(&at("1999-12-31", "08:00")));

        let reminder = reminder_factory(Recurrence::Daily, "garbage");
        assert!(reminder.fires(&at("2024-01-17", "08:00")));
    }

    #[test]
    fn once_fires_only_on_its_date() {
        let reminder = reminder_factory(Recurrence::Once, "2024-01-17");
        assert!(reminder.fires(&at("2024-01-17", "08:00")));
        assert!(!reminder.fires(&at("2024-01-18", "08:00")));
        assert!(!reminder.fires(&at("2023-01-17", "08:00")));
    }

    #[test]
    fn weekly_fires_on_same_weekday_as_anchor() {
        // 2024-01-17 is a Wednesday
        let reminder = reminder_factory(Recurrence::Weekly, "2024-01-17");
        let wednesdays = ["2024-01-17", "2024-01-24", "2024-03-06", "2023-12-27"];
        for day in wednesdays.iter() {
            assert!(reminder.fires(&at(day, "08:00")), "{}", day);
        }
        let others = ["2024-01-15", "2024-01-16", "2024-01-18", "2024-01-19", "2024-01-20", "2024-01-21"];
        for day in others.iter() {
            assert!(!reminder.fires(&at(day, "08:00")), "{}", day);
        }
    }

    #[test]
    fn monthly_fires_on_same_day_of_month() {
        let reminder = reminder_factory(Recurrence::Monthly, "2024-01-15");
        assert!(reminder.fires(&at("2024-01-15", "08:00")));
        assert!(reminder.fires(&at("2024-02-15", "08:00")));
        assert!(reminder.fires(&at("2025-07-15", "08:00")));
        assert!(!reminder.fires(&at("2024-02-14", "08:00")));
        assert!(!reminder.fires(&at("2024-02-16", "08:00")));
    }

    #[test]
    fn unknown_recurrence_and_bad_anchor_never_fire() {
        let reminder = reminder_factory(Recurrence::from("yearly".to_string()), "2024-01-17");
        assert_eq!(reminder.recurrence, Recurrence::Unknown("yearly".into()));
        assert!(!reminder.fires(&at("2024-01-17", "08:00")));

        let reminder = reminder_factory(Recurrence::Weekly, "not-a-date");
        assert!(!reminder.fires(&at("2024-01-17", "08:00")));
        let reminder = reminder_factory(Recurrence::Monthly, "");
        assert!(!reminder.fires(&at("2024-01-17", "08:00")));
    }

    #[test]
    fn recurrence_roundtrips_through_json() {
        let kinds = serde_json::to_string(&vec![Recurrence::Weekly, Recurrence::Unknown("hourly".into())])
            .unwrap();
        assert_eq!(kinds, r#"["weekly","hourly"]"#);
        let parsed: Vec<Recurrence> = serde_json::from_str(&kinds).unwrap();
        assert_eq!(parsed, vec![Recurrence::Weekly, Recurrence::Unknown("hourly".into())]);
    }

    #[test]
    fn snooze_moves_time_and_date_of_once_reminders() {
        let mut reminder = reminder_factory(Recurrence::Once, "2024-01-10");
        reminder.snooze(&at("2024-01-17", "23:55"), 10).unwrap();
        assert_eq!(reminder.time, "00:05");
        assert_eq!(reminder.date, "2024-01-18");

        let mut reminder = reminder_factory(Recurrence::Daily, "2024-01-10");
        reminder
            .snooze(&at("2024-01-17", "09:00"), DEFAULT_SNOOZE_MINUTES)
            .unwrap();
        assert_eq!(reminder.time, "09:10");
        assert_eq!(reminder.date, "2024-01-10");
    }

    #[test]
    fn snoozed_reminder_fires_at_new_time_only() {
        let mut reminder = reminder_factory(Recurrence::Once, "2024-01-10");
        let now = at("2024-01-17", "08:00");
        reminder.snooze(&now, 15).unwrap();
        assert_eq!(reminder.time, "08:15");
        assert!(reminder.fires(&at("2024-01-17", "08:15")));
    }

    #[test]
    fn snooze_rejects_out_of_range_durations() {
        let original = reminder_factory(Recurrence::Once, "2024-01-10");
        let now = at("2024-01-17", "08:00");
        for duration in [0, -1, MAX_SNOOZE_MINUTES + 1, 1_000_000_000_000, i64::MAX] {
            let mut reminder = original.clone();
            assert_eq!(reminder.snooze(&now, duration), None);
            assert_eq!(reminder, original);
        }

        let mut reminder = original.clone();
        assert_eq!(reminder.snooze(&now, MAX_SNOOZE_MINUTES), Some(()));
        assert_eq!(reminder.date, "2025-01-16");
        assert_eq!(reminder.time, "08:00");
    }

    #[test]
    fn composes_notification_message() {
        let reminder = reminder_factory(Recurrence::Daily, "2024-01-17");
        assert_eq!(reminder.notification_message(), "It's time for: Metformin (500mg)");

        let mut reminder = reminder;
        reminder.dosage = None;
        assert_eq!(reminder.notification_message(), "It's time for: Metformin");
    }

    #[test]
    fn validates_anchor_and_time() {
        let reminder = reminder_factory(Recurrence::Once, "2024-01-17");
        assert!(reminder.is_valid());

        let mut invalid = reminder.clone();
        invalid.time = "8:00".into();
        assert!(!invalid.is_valid());

        let mut invalid = reminder.clone();
        invalid.date = "17-01-2024".into();
        assert!(!invalid.is_valid());

        let mut invalid = reminder;
        invalid.title = "  ".into();
        assert!(!invalid.is_valid());
    }
}
