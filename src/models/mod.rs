pub mod course;

pub use course::{Course, CourseDto, CourseType};
