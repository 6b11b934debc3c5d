use thiserror::Error;

use crate::models::{Course, CourseDto, CourseType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Unknown course type code: {0}")]
    UnknownCourseType(i32),
}

pub fn to_entity(dto: &CourseDto) -> Course {
    Course {
        course_id: dto.course_id,
        course_name: dto.course_name.clone(),
        course_duration: dto.course_duration,
        course_type: dto.course_type.code(),
    }
}

pub fn to_dto(course: &Course) -> Result<CourseDto, MappingError> {
    let course_type =
        CourseType::try_from(course.course_type).map_err(MappingError::UnknownCourseType)?;

    Ok(CourseDto {
        course_id: course.course_id,
        course_name: course.course_name.clone(),
        course_duration: course.course_duration,
        course_type,
    })
}
