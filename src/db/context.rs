use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::models::Course;

/// Unit of work over the `courses` table.
///
/// Dropping a context without calling [`commit`](Self::commit) rolls back
/// everything it wrote.
pub struct CmsDatabaseContext {
    tx: Transaction<'static, Sqlite>,
}

impl CmsDatabaseContext {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    pub async fn list_all(&mut self) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT course_id, course_name, course_duration, course_type FROM courses ORDER BY course_id"
        )
        .fetch_all(&mut *self.tx)
        .await
    }

    pub async fn find_by_id(&mut self, course_id: i32) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT course_id, course_name, course_duration, course_type FROM courses WHERE course_id = ?"
        )
        .bind(course_id)
        .fetch_optional(&mut *self.tx)
        .await
    }

    /// Inserts `course` under a freshly assigned id; `course.course_id` is ignored.
    pub async fn add(&mut self, course: &Course) -> Result<Course, sqlx::Error> {
        let inserted = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (course_name, course_duration, course_type)
            VALUES (?1, ?2, ?3)
            RETURNING course_id, course_name, course_duration, course_type
            "#
        )
        .bind(&course.course_name)
        .bind(course.course_duration)
        .bind(course.course_type)
        .fetch_one(&mut *self.tx)
        .await?;

        debug!("added course {}", inserted.course_id);
        Ok(inserted)
    }

    pub async fn update(&mut self, course: &Course) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "UPDATE courses SET course_name = ?, course_duration = ?, course_type = ? WHERE course_id = ?"
        )
        .bind(&course.course_name)
        .bind(course.course_duration)
        .bind(course.course_type)
        .bind(course.course_id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    pub async fn remove(&mut self, course: &Course) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE course_id = ?")
            .bind(course.course_id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        debug!("removed course {}", course.course_id);
        Ok(())
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::CourseStore;

    async fn setup_test_store() -> CourseStore {
        CourseStore::connect("sqlite::memory:")
            .await
            .expect("Failed to create test store")
    }

    fn course(name: &str, duration: i32, course_type: i32) -> Course {
        Course {
            course_id: 0,
            course_name: name.to_string(),
            course_duration: duration,
            course_type,
        }
    }

    #[tokio::test]
    async fn test_add_and_list_courses() {
        let store = setup_test_store().await;

        let mut ctx = store.context().await.unwrap();
        let first = ctx.add(&course("Algorithms", 12, 1)).await.unwrap();
        let second = ctx.add(&course("Anatomy", 20, 2)).await.unwrap();
        ctx.commit().await.unwrap();

        assert_eq!(first.course_id, 1);
        assert_eq!(second.course_id, 2);

        let mut ctx = store.context().await.unwrap();
        let courses = ctx.list_all().await.unwrap();
        assert_eq!(courses, vec![first, second]);
    }

    #[tokio::test]
    async fn test_add_ignores_supplied_id() {
        let store = setup_test_store().await;

        let mut supplied = course("Finance", 6, 3);
        supplied.course_id = 42;

        let mut ctx = store.context().await.unwrap();
        let inserted = ctx.add(&supplied).await.unwrap();
        ctx.commit().await.unwrap();

        assert_eq!(inserted.course_id, 1);
    }

    #[tokio::test]
    async fn test_find_missing_course() {
        let store = setup_test_store().await;

        let mut ctx = store.context().await.unwrap();
        assert_eq!(ctx.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_uncommitted_changes_are_discarded() {
        let store = setup_test_store().await;

        {
            let mut ctx = store.context().await.unwrap();
            ctx.add(&course("Draft", 1, 1)).await.unwrap();
        }

        let mut ctx = store.context().await.unwrap();
        assert!(ctx.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_course() {
        let store = setup_test_store().await;

        let mut ctx = store.context().await.unwrap();
        let mut saved = ctx.add(&course("Algorithms", 12, 1)).await.unwrap();
        ctx.commit().await.unwrap();

        saved.course_duration = 16;
        saved.course_type = 3;
        let mut ctx = store.context().await.unwrap();
        ctx.update(&saved).await.unwrap();
        ctx.commit().await.unwrap();

        let mut ctx = store.context().await.unwrap();
        let found = ctx.find_by_id(saved.course_id).await.unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_remove_does_not_reuse_ids() {
        let store = setup_test_store().await;

        let mut ctx = store.context().await.unwrap();
        let saved = ctx.add(&course("Algorithms", 12, 1)).await.unwrap();
        ctx.commit().await.unwrap();

        let mut ctx = store.context().await.unwrap();
        ctx.remove(&saved).await.unwrap();
        ctx.commit().await.unwrap();

        let mut ctx = store.context().await.unwrap();
        assert_eq!(ctx.find_by_id(saved.course_id).await.unwrap(), None);
        let next = ctx.add(&course("Compilers", 10, 1)).await.unwrap();
        ctx.commit().await.unwrap();

        assert!(next.course_id > saved.course_id);
    }

    #[tokio::test]
    async fn test_remove_missing_course() {
        let store = setup_test_store().await;

        let mut ghost = course("Ghost", 1, 1);
        ghost.course_id = 7;

        let mut ctx = store.context().await.unwrap();
        let err = ctx.remove(&ghost).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }
}
