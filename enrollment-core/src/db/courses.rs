use rusqlite::{params, params_from_iter, types::ToSql, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{uuid_column, Database};
use crate::error::{Error, Result};
use crate::models::{Course, CreateCourseInput, Patch, UpdateCourseInput};

const SELECT_COURSE: &str = "SELECT id, name, credits FROM courses";

impl Database {
    pub fn create_course(&self, input: CreateCourseInput) -> Result<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            name: input.name,
            credits: input.credits,
        };

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO courses (id, name, credits) VALUES (?1, ?2, ?3)",
                params![course.id.to_string(), course.name, course.credits],
            )?;
            Ok(())
        })?;

        tracing::debug!(course_id = %course.id, "created course");
        Ok(course)
    }

    pub fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
        self.with_connection(|conn| find_course(conn, id))
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COURSE} ORDER BY rowid"))?;
            let courses = stmt
                .query_map([], map_course)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(courses)
        })
    }

    /// Applies the supplied fields and returns the course as stored
    /// afterwards, or `None` when no course has this id.
    pub fn update_course(&self, id: Uuid, input: UpdateCourseInput) -> Result<Option<Course>> {
        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        match input.name {
            Patch::Absent => {}
            Patch::Null => return Err(Error::InvalidInput("name cannot be null".into())),
            Patch::Value(name) => {
                assignments.push("name = ?");
                values.push(Box::new(name));
            }
        }
        match input.credits {
            Patch::Absent => {}
            Patch::Null => return Err(Error::InvalidInput("credits cannot be null".into())),
            Patch::Value(credits) => {
                assignments.push("credits = ?");
                values.push(Box::new(credits));
            }
        }

        self.with_connection(move |conn| {
            if !assignments.is_empty() {
                let sql = format!("UPDATE courses SET {} WHERE id = ?", assignments.join(", "));
                values.push(Box::new(id.to_string()));

                let updated = conn.execute(&sql, params_from_iter(values.iter()))?;
                if updated == 0 {
                    return Ok(None);
                }
                tracing::debug!(course_id = %id, fields = ?assignments, "updated course");
            }
            find_course(conn, id)
        })
    }
}

pub(super) fn find_course(conn: &Connection, id: Uuid) -> Result<Option<Course>> {
    let course = conn
        .query_row(
            &format!("{SELECT_COURSE} WHERE id = ?1"),
            [id.to_string()],
            map_course,
        )
        .optional()?;
    Ok(course)
}

fn map_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        credits: row.get(2)?,
    })
}
