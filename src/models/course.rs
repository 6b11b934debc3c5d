use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row stored in the `courses` table. `course_type` holds the raw code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: i32,
    pub course_name: String,
    pub course_duration: i32,
    pub course_type: i32,
}

/// Wire shape of a course. Same fields as [`Course`], with the type by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[serde(default)]
    pub course_id: i32,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub course_duration: i32,
    pub course_type: CourseType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    Engineering = 1,
    Medical = 2,
    Management = 3,
}

impl CourseType {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for CourseType {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CourseType::Engineering),
            2 => Ok(CourseType::Medical),
            3 => Ok(CourseType::Management),
            other => Err(other),
        }
    }
}
