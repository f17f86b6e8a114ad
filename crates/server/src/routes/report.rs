use crate::{
    AppState,
    dtos::query::{CourseSectionsQuery, DegreeSnapshotQuery, InstructorSectionsQuery},
    error::{ApiError, ApiResult},
};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::report::{
    DegreeSnapshot, NonFRow, ReportService, SectionRow, SectionStatusRow,
};
use models::form::{DegreeSnapshotFilter, NonFFilter, SectionHistoryFilter, SemesterFilter};

/// Courses, objectives and sections of one degree
#[utoipa::path(
    get,
    path = "/reports/degree-snapshot",
    params(DegreeSnapshotQuery),
    responses(
        (status = 200, description = "Degree snapshot", body = DegreeSnapshot),
        (status = 400, description = "Missing degree", body = ApiError)
    ),
    tag = "Reports"
)]
pub async fn degree_snapshot(
    State(state): State<AppState>,
    Query(query): Query<DegreeSnapshotQuery>,
) -> ApiResult<DegreeSnapshot> {
    let filter = DegreeSnapshotFilter::from(query);
    Ok(Json(ReportService::degree_snapshot(&state.db, &filter).await?))
}

/// Sections of a course within a semester range
#[utoipa::path(
    get,
    path = "/reports/course-sections",
    params(CourseSectionsQuery),
    responses(
        (status = 200, description = "Sections in semester order", body = Vec<SectionRow>),
        (status = 400, description = "Missing course number", body = ApiError)
    ),
    tag = "Reports"
)]
pub async fn course_sections(
    State(state): State<AppState>,
    Query(query): Query<CourseSectionsQuery>,
) -> ApiResult<Vec<SectionRow>> {
    let filter = SectionHistoryFilter::from(query);
    Ok(Json(ReportService::course_sections(&state.db, &filter).await?))
}

/// Sections an instructor taught within a semester range
#[utoipa::path(
    get,
    path = "/reports/instructor-sections",
    params(InstructorSectionsQuery),
    responses(
        (status = 200, description = "Sections in semester order", body = Vec<SectionRow>),
        (status = 400, description = "Missing instructor id", body = ApiError)
    ),
    tag = "Reports"
)]
pub async fn instructor_sections(
    State(state): State<AppState>,
    Query(query): Query<InstructorSectionsQuery>,
) -> ApiResult<Vec<SectionRow>> {
    let filter = SectionHistoryFilter::from(query);
    Ok(Json(
        ReportService::instructor_sections(&state.db, &filter).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/reports/evaluation-status",
    params(SemesterFilter),
    responses(
        (status = 200, description = "Evaluation progress per section", body = Vec<SectionStatusRow>),
        (status = 400, description = "Invalid year or term", body = ApiError)
    ),
    tag = "Reports"
)]
pub async fn evaluation_status(
    State(state): State<AppState>,
    Query(filter): Query<SemesterFilter>,
) -> ApiResult<Vec<SectionStatusRow>> {
    Ok(Json(
        ReportService::evaluation_status(&state.db, &filter).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/reports/non-f",
    params(NonFFilter),
    responses(
        (status = 200, description = "Sections meeting the non-F threshold", body = Vec<NonFRow>),
        (status = 400, description = "Invalid semester or threshold", body = ApiError)
    ),
    tag = "Reports"
)]
pub async fn non_f_sections(
    State(state): State<AppState>,
    Query(filter): Query<NonFFilter>,
) -> ApiResult<Vec<NonFRow>> {
    Ok(Json(ReportService::non_f_sections(&state.db, &filter).await?))
}
