use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::error::Result;
use crate::models::{CreateStudentInput, Student};

impl Database {
    pub fn create_student(&self, input: CreateStudentInput) -> Result<Student> {
        let student = Student {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
        };

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO students (id, first_name, last_name) VALUES (?1, ?2, ?3)",
                params![student.id.to_string(), student.first_name, student.last_name],
            )?;
            Ok(())
        })?;

        tracing::debug!(student_id = %student.id, "created student");
        Ok(student)
    }

    pub fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
        self.with_connection(|conn| find_student(conn, id))
    }
}

pub(super) fn find_student(conn: &Connection, id: Uuid) -> Result<Option<Student>> {
    let student = conn
        .query_row(
            "SELECT id, first_name, last_name FROM students WHERE id = ?1",
            [id.to_string()],
            map_student,
        )
        .optional()?;
    Ok(student)
}

/// Maps `id, first_name, last_name` starting at column `offset`.
pub(super) fn student_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Student> {
    Ok(Student {
        id: uuid_column(row, offset)?,
        first_name: row.get(offset + 1)?,
        last_name: row.get(offset + 2)?,
    })
}

fn map_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    student_at(row, 0)
}
