/// Types for SIX schedule data
use serde::{Deserialize, Serialize};

/// One weekly meeting of a class, parsed from a `/`-delimited schedule line.
///
/// Two slots are the same slot when all five fields match, regardless of which
/// calendar date the source line carried.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScheduleSlot {
    pub day: String,
    pub time: String,
    pub room: String,
    pub activity: String,
    pub method: String,
}

/// A single class (course + class number) from the schedule table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseClass {
    pub code: String,
    pub name: String,

    #[serde(rename = "sks")]
    pub credit_units: i64,

    #[serde(rename = "class_no")]
    pub class_number: String,

    pub quota: i64,
    pub lecturers: Vec<String>,
    pub notes: String,

    #[serde(rename = "schedules")]
    pub slots: Vec<ScheduleSlot>,
}

/// The logged-in student and the semester SIX currently points them at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub student_id: String,
    /// Year-term code, e.g. `2024-1`
    pub semester: String,
}

/// A schedule lookup as received from the caller.
///
/// Only the four filters SIX understands are kept; anything else the caller
/// sent never reaches the upstream URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub student_id: String,
    pub semester: String,
    pub fakultas: Option<String>,
    pub prodi: Option<String>,
    pub pekan: Option<String>,
    pub kegiatan: Option<String>,
}

impl ScheduleQuery {
    pub fn new(student_id: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            semester: semester.into(),
            ..Default::default()
        }
    }

    /// Non-empty filters as `(name, value)` pairs, sorted by name.
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("fakultas", &self.fakultas),
            ("kegiatan", &self.kegiatan),
            ("pekan", &self.pekan),
            ("prodi", &self.prodi),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }
}
