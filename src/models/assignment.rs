use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{timestamp, Entity, ParseEnumError};

/// Assignment priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Get all priorities for iteration
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Display label, e.g. "High Priority"
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseEnumError {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// An assignment as returned by `/api/assignments/`
///
/// `course_name` is denormalized by the backend for display. `completed` is
/// read-only here: it only changes through the toggle endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub course_id: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(with = "timestamp")]
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl Assignment {
    /// The editable fields of this assignment, as an update payload
    pub fn to_input(&self) -> AssignmentInput {
        AssignmentInput {
            title: self.title.clone(),
            description: self.description.clone(),
            course_id: self.course_id.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

impl Entity for Assignment {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Create/update payload for an assignment
///
/// Has no `completed` field; completion only changes through the toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub course_id: String,
    #[serde(with = "timestamp")]
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub priority: Priority,
}

/// Response of `PATCH /api/assignments/{id}/complete`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionStatus {
    #[serde(default)]
    pub message: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_assignment_defaults() {
        let assignment: Assignment = serde_json::from_str(
            r#"{"id": "a1", "title": "Essay", "course_id": "c1",
                "due_date": "2024-05-01T23:59:00"}"#,
        )
        .unwrap();

        assert_eq!(assignment.priority, Priority::Medium);
        assert!(assignment.is_pending());
        assert!(assignment.course_name.is_none());
    }

    #[test]
    fn test_input_has_no_completed_field() {
        let assignment: Assignment = serde_json::from_str(
            r#"{"id": "a1", "title": "Essay", "course_id": "c1", "completed": true,
                "due_date": "2024-05-01T23:59:00", "priority": "high"}"#,
        )
        .unwrap();

        let json = serde_json::to_value(assignment.to_input()).unwrap();
        assert!(json.get("completed").is_none());
        assert_eq!(json["due_date"], "2024-05-01T23:59:00");
        assert_eq!(json["priority"], "high");
    }
}
