use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Course, Student};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrollment_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollmentInput {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

/// One enrollment row projected onto its student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    pub student: Student,
}

/// The course (if it exists) followed by every enrollment row for it.
///
/// Serializes as a two-element JSON array: `[course | null, [...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRoster(pub Option<Course>, pub Vec<EnrolledStudent>);

impl CourseRoster {
    pub fn course(&self) -> Option<&Course> {
        self.0.as_ref()
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.1.iter().map(|row| &row.student)
    }
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCount {
    pub count: usize,
}
