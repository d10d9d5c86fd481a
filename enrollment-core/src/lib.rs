//! Core library for the enrollment service.
//!
//! This crate provides the domain models and database operations for
//! students, courses and enrollments, independent of any transport layer
//! (HTTP, MCP, etc.).
//!
//! # Usage
//!
//! ```no_run
//! use enrollment_core::db::Database;
//! use enrollment_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let course = db.create_course(CreateCourseInput {
//!     name: "Algorithms".into(),
//!     credits: 4,
//! })?;
//! let courses = db.get_all_courses()?;
//! assert!(courses.iter().any(|c| c.id == course.id));
//! # Ok::<(), enrollment_core::Error>(())
//! ```

pub mod db;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use error::{Error, Result};
