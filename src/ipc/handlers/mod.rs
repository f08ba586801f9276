pub mod assignments;
pub mod core;
pub mod courses;
pub mod grades;
pub mod students;
pub mod summary;
