//! The enrollment procedures.
//!
//! Every procedure validates its input, issues a single store operation and
//! returns the stored shape. Both transports (HTTP RPC and MCP) call into
//! [`EnrollmentService`] so they share one set of rules.

use enrollment_core::models::*;
use enrollment_core::{Database, Error, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdInput {
    #[schemars(description = "The student ID (UUID) to look up")]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseIdInput {
    #[schemars(description = "The course ID (UUID)")]
    pub course_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentInput {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseInput {
    pub name: String,
    #[schemars(description = "Number of credits the course is worth")]
    pub credits: i32,
}

/// Identifies every enrollment of one student in one course.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseInput {
    #[schemars(description = "The student ID (UUID)")]
    pub student_id: String,
    #[schemars(description = "The course ID (UUID)")]
    pub course_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDataInput {
    #[schemars(description = "The course ID (UUID) to update")]
    pub course_id: String,
    #[serde(default)]
    #[schemars(with = "Option<String>", description = "New name; omit to keep the current one")]
    pub name: Patch<String>,
    #[serde(default)]
    #[schemars(with = "Option<i32>", description = "New credits; omit to keep the current value")]
    pub credits: Patch<i32>,
}

#[derive(Clone)]
pub struct EnrollmentService {
    db: Database,
}

impl EnrollmentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Looks up one student. The id is required: calling without one fails
    /// instead of listing every student.
    pub fn get_student_by_id(&self, input: StudentIdInput) -> Result<Student> {
        let raw = input
            .student_id
            .ok_or(Error::MissingInput("Id is not provided"))?;
        let id = parse_uuid("studentId", &raw)?;

        tracing::debug!(student_id = %id, "fetching student");
        self.db
            .get_student(id)?
            .ok_or(Error::NotFound("Student not found"))
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        let courses = self.db.get_all_courses()?;
        tracing::debug!(count = courses.len(), "fetched courses");
        Ok(courses)
    }

    pub fn get_students_on_course(&self, input: CourseIdInput) -> Result<CourseRoster> {
        let course_id = parse_uuid("courseId", &input.course_id)?;

        tracing::debug!(%course_id, "fetching course roster");
        self.db.get_course_roster(course_id)
    }

    pub fn insert_student(&self, input: NewStudentInput) -> Result<Student> {
        let student = self.db.create_student(CreateStudentInput {
            first_name: input.first_name,
            last_name: input.last_name,
        })?;
        tracing::info!(student_id = %student.id, "inserted student");
        Ok(student)
    }

    pub fn insert_course(&self, input: NewCourseInput) -> Result<Course> {
        let course = self.db.create_course(CreateCourseInput {
            name: input.name,
            credits: input.credits,
        })?;
        tracing::info!(course_id = %course.id, credits = course.credits, "inserted course");
        Ok(course)
    }

    pub fn enroll_student(&self, input: StudentCourseInput) -> Result<Enrollment> {
        let student_id = parse_uuid("studentId", &input.student_id)?;
        let course_id = parse_uuid("courseId", &input.course_id)?;

        let enrollment = self.db.create_enrollment(CreateEnrollmentInput {
            student_id,
            course_id,
        })?;
        tracing::info!(
            enrollment_id = %enrollment.id,
            %student_id,
            %course_id,
            "enrolled student"
        );
        Ok(enrollment)
    }

    pub fn update_course(&self, input: UpdateCourseDataInput) -> Result<Course> {
        let course_id = parse_uuid("courseId", &input.course_id)?;

        let course = self
            .db
            .update_course(
                course_id,
                UpdateCourseInput {
                    name: input.name,
                    credits: input.credits,
                },
            )?
            .ok_or(Error::NotFound("Course not found"))?;
        tracing::info!(%course_id, "updated course");
        Ok(course)
    }

    pub fn remove_student_from_course(&self, input: StudentCourseInput) -> Result<BatchCount> {
        let student_id = parse_uuid("studentId", &input.student_id)?;
        let course_id = parse_uuid("courseId", &input.course_id)?;

        let removed = self.db.delete_enrollments(student_id, course_id)?;
        tracing::info!(%student_id, %course_id, count = removed.count, "removed enrollments");
        Ok(removed)
    }
}

/// Accepts only the hyphenated 8-4-4-4-12 form; `Uuid::parse_str` alone
/// would also take the simple, braced and urn forms.
fn parse_uuid(field: &str, raw: &str) -> Result<Uuid> {
    if raw.len() != HYPHENATED_LEN {
        return Err(Error::InvalidInput(format!("{field}: invalid uuid")));
    }
    Uuid::parse_str(raw).map_err(|e| Error::InvalidInput(format!("{field}: invalid uuid: {e}")))
}

const HYPHENATED_LEN: usize = 36;
