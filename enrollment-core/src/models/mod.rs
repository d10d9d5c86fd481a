mod course;
mod enrollment;
mod patch;
mod student;

pub use course::*;
pub use enrollment::*;
pub use patch::*;
pub use student::*;
