use axum::Json;
use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::mapper;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

// Returns stored rows as-is, so `courseType` is the integer code here.
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let mut ctx = state.store.context().await?;
    let courses = ctx.list_all().await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let course = mapper::to_entity(&req);

    let mut ctx = state.store.context().await?;
    let course = ctx.add(&course).await?;
    ctx.commit().await?;

    let dto = mapper::to_dto(&course)?;
    info!("created course {}", dto.course_id);

    let location = format!("/courses/{}", dto.course_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(dto)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<CourseDto>, AppError> {
    let mut ctx = state.store.context().await?;
    let course = ctx.find_by_id(course_id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(mapper::to_dto(&course)?))
}

async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    Json(req): Json<CourseDto>,
) -> Result<Json<CourseDto>, AppError> {
    let mut ctx = state.store.context().await?;
    let mut course = ctx.find_by_id(course_id).await?.ok_or(AppError::NotFound)?;

    course.course_name = req.course_name;
    course.course_duration = req.course_duration;
    course.course_type = req.course_type.code();

    ctx.update(&course).await?;
    ctx.commit().await?;

    info!("updated course {}", course_id);
    Ok(Json(mapper::to_dto(&course)?))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let mut ctx = state.store.context().await?;
    let course = ctx.find_by_id(course_id).await?.ok_or(AppError::NotFound)?;

    ctx.remove(&course).await?;
    ctx.commit().await?;

    info!("deleted course {}", course_id);
    Ok(StatusCode::OK)
}
