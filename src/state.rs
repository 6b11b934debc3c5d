use crate::db::CourseStore;

#[derive(Clone)]
pub struct AppState {
    pub store: CourseStore,
}
