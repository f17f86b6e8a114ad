use crate::{
    AppState,
    dtos::query::CoreOnlyQuery,
    error::{ApiError, ApiResult},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::{
    entities::{courses, degrees, instructors, objectives, semesters},
    services::{
        catalog::{CatalogService, DegreeCourseViewRow, WorksheetRow},
        report::{DegreeCourseRow, ObjectiveRow},
    },
};
use models::form::WorksheetFilter;

#[utoipa::path(
    get,
    path = "/degrees",
    responses((status = 200, description = "All degrees", body = Vec<degrees::Model>)),
    tag = "Catalog"
)]
pub async fn list_degrees(State(state): State<AppState>) -> ApiResult<Vec<degrees::Model>> {
    Ok(Json(CatalogService::list_degrees(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/courses",
    responses((status = 200, description = "All courses", body = Vec<courses::Model>)),
    tag = "Catalog"
)]
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Vec<courses::Model>> {
    Ok(Json(CatalogService::list_courses(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/instructors",
    responses((status = 200, description = "All instructors by name", body = Vec<instructors::Model>)),
    tag = "Catalog"
)]
pub async fn list_instructors(
    State(state): State<AppState>,
) -> ApiResult<Vec<instructors::Model>> {
    Ok(Json(CatalogService::list_instructors(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/semesters",
    responses((status = 200, description = "All semesters in calendar order", body = Vec<semesters::Model>)),
    tag = "Catalog"
)]
pub async fn list_semesters(State(state): State<AppState>) -> ApiResult<Vec<semesters::Model>> {
    Ok(Json(CatalogService::list_semesters(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/objectives",
    responses((status = 200, description = "All objectives", body = Vec<objectives::Model>)),
    tag = "Catalog"
)]
pub async fn list_objectives(State(state): State<AppState>) -> ApiResult<Vec<objectives::Model>> {
    Ok(Json(CatalogService::list_objectives(&state.db).await?))
}

/// Every course, flagged with whether the degree owns it
#[utoipa::path(
    get,
    path = "/degrees/{name}/{level}/course-view",
    params(
        ("name" = String, Path, description = "Degree name"),
        ("level" = String, Path, description = "Degree level")
    ),
    responses((status = 200, description = "Course flags for the degree", body = Vec<DegreeCourseViewRow>)),
    tag = "Catalog"
)]
pub async fn degree_course_view(
    State(state): State<AppState>,
    Path((name, level)): Path<(String, String)>,
) -> ApiResult<Vec<DegreeCourseViewRow>> {
    Ok(Json(
        CatalogService::degree_course_view(&state.db, &name, &level).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/degrees/{name}/{level}/courses",
    params(
        ("name" = String, Path, description = "Degree name"),
        ("level" = String, Path, description = "Degree level"),
        CoreOnlyQuery
    ),
    responses((status = 200, description = "Courses owned by the degree", body = Vec<DegreeCourseRow>)),
    tag = "Catalog"
)]
pub async fn degree_courses(
    State(state): State<AppState>,
    Path((name, level)): Path<(String, String)>,
    Query(query): Query<CoreOnlyQuery>,
) -> ApiResult<Vec<DegreeCourseRow>> {
    Ok(Json(
        CatalogService::degree_courses(&state.db, &name, &level, query.core_only).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/degrees/{name}/{level}/courses/{course_no}/objectives",
    params(
        ("name" = String, Path, description = "Degree name"),
        ("level" = String, Path, description = "Degree level"),
        ("course_no" = String, Path, description = "Course number")
    ),
    responses((status = 200, description = "Objectives the course assesses for the degree", body = Vec<ObjectiveRow>)),
    tag = "Catalog"
)]
pub async fn course_objectives(
    State(state): State<AppState>,
    Path((name, level, course_no)): Path<(String, String, String)>,
) -> ApiResult<Vec<ObjectiveRow>> {
    Ok(Json(
        CatalogService::course_objectives(&state.db, &name, &level, &course_no).await?,
    ))
}

/// Evaluation worksheet of one instructor for a degree and semester
#[utoipa::path(
    get,
    path = "/worksheet",
    params(WorksheetFilter),
    responses(
        (status = 200, description = "One row per section objective", body = Vec<WorksheetRow>),
        (status = 400, description = "Incomplete filter", body = ApiError)
    ),
    tag = "Catalog"
)]
pub async fn evaluation_worksheet(
    State(state): State<AppState>,
    Query(filter): Query<WorksheetFilter>,
) -> ApiResult<Vec<WorksheetRow>> {
    Ok(Json(
        CatalogService::evaluation_worksheet(&state.db, &filter).await?,
    ))
}
