use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::{timestamp, Entity, ParseEnumError};

/// Day-of-week label attached to recurring schedule entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn all() -> &'static [DayOfWeek] {
        &[
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
            DayOfWeek::Saturday,
            DayOfWeek::Sunday,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DayOfWeek::all()
            .iter()
            .copied()
            .find(|day| {
                day.as_str().eq_ignore_ascii_case(wanted)
                    || (wanted.len() == 3 && day.as_str()[..3].eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| ParseEnumError {
                field: "day_of_week",
                value: s.to_string(),
            })
    }
}

/// A schedule entry as returned by `/api/schedules/`
///
/// `end_time >= start_time` is expected but not enforced on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    #[serde(default, deserialize_with = "blank_day_as_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl Schedule {
    /// The editable fields of this entry, as an update payload
    pub fn to_input(&self) -> ScheduleInput {
        ScheduleInput {
            title: self.title.clone(),
            description: self.description.clone(),
            course_id: self.course_id.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            day_of_week: self.day_of_week,
            location: self.location.clone(),
        }
    }
}

impl Entity for Schedule {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Create/update payload for a schedule entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    #[serde(default, deserialize_with = "blank_day_as_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub location: Option<String>,
}

// Older records store "" for "no day selected"
fn blank_day_as_none<'de, D>(deserializer: D) -> Result<Option<DayOfWeek>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_parse() {
        assert_eq!("monday".parse::<DayOfWeek>(), Ok(DayOfWeek::Monday));
        assert_eq!("Fri".parse::<DayOfWeek>(), Ok(DayOfWeek::Friday));
        assert!("Funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_blank_day_of_week_is_none() {
        let schedule: Schedule = serde_json::from_str(
            r#"{"id": "s1", "title": "Lecture", "day_of_week": "",
                "start_time": "2024-05-01T09:00:00", "end_time": "2024-05-01T10:30:00"}"#,
        )
        .unwrap();

        assert!(schedule.day_of_week.is_none());
        assert!(schedule.course_id.is_none());
    }

    #[test]
    fn test_unknown_day_of_week_rejected() {
        let result: Result<Schedule, _> = serde_json::from_str(
            r#"{"id": "s1", "title": "Lecture", "day_of_week": "Caturday",
                "start_time": "2024-05-01T09:00:00", "end_time": "2024-05-01T10:30:00"}"#,
        );
        assert!(result.is_err());
    }
}
