use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use super::courses::find_course;
use super::students::student_at;
use super::Database;
use crate::error::Result;
use crate::models::{BatchCount, CourseRoster, CreateEnrollmentInput, EnrolledStudent, Enrollment};

impl Database {
    /// Records an enrollment dated now. Fails with a constraint violation
    /// when the student or the course does not exist.
    pub fn create_enrollment(&self, input: CreateEnrollmentInput) -> Result<Enrollment> {
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student_id: input.student_id,
            course_id: input.course_id,
            enrollment_date: Utc::now(),
        };

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO enrollments (id, student_id, course_id, enrollment_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    enrollment.id.to_string(),
                    enrollment.student_id.to_string(),
                    enrollment.course_id.to_string(),
                    enrollment.enrollment_date.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;

        tracing::debug!(
            enrollment_id = %enrollment.id,
            student_id = %enrollment.student_id,
            course_id = %enrollment.course_id,
            "created enrollment"
        );
        Ok(enrollment)
    }

    /// Loads the course and the student of every enrollment row for it.
    /// A missing course yields `None` in the first slot rather than an error.
    pub fn get_course_roster(&self, course_id: Uuid) -> Result<CourseRoster> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.first_name, s.last_name
                 FROM enrollments e
                 JOIN students s ON s.id = e.student_id
                 WHERE e.course_id = ?1
                 ORDER BY e.rowid",
            )?;
            let rows = stmt
                .query_map([course_id.to_string()], |row| {
                    Ok(EnrolledStudent {
                        student: student_at(row, 0)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let course = find_course(conn, course_id)?;
            Ok(CourseRoster(course, rows))
        })
    }

    /// Deletes every enrollment of the student in the course.
    pub fn delete_enrollments(&self, student_id: Uuid, course_id: Uuid) -> Result<BatchCount> {
        let count = self.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
                params![student_id.to_string(), course_id.to_string()],
            )?)
        })?;

        tracing::debug!(%student_id, %course_id, count, "deleted enrollments");
        Ok(BatchCount { count })
    }
}
