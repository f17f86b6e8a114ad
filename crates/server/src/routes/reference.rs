use crate::{
    AppState,
    dtos::{
        query::{CourseKeyQuery, DegreeKeyQuery, InstructorKeyQuery, ObjectiveKeyQuery, SemesterKeyQuery},
        response::MessageResponse,
    },
    error::{ApiError, ApiResult},
};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::reference::ReferenceService;
use models::form::{CourseForm, DegreeForm, InstructorForm, ObjectiveForm, SemesterForm};

/// Create or update a degree
#[utoipa::path(
    post,
    path = "/degrees",
    request_body = DegreeForm,
    responses(
        (status = 200, description = "Degree saved", body = MessageResponse),
        (status = 400, description = "Invalid degree fields", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn save_degree(
    State(state): State<AppState>,
    Json(form): Json<DegreeForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(ReferenceService::save_degree(&state.db, &form).await?.into()))
}

/// Delete a degree along with everything attached to it
#[utoipa::path(
    delete,
    path = "/degrees",
    params(DegreeKeyQuery),
    responses(
        (status = 200, description = "Degree deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Missing key", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn delete_degree(
    State(state): State<AppState>,
    Query(key): Query<DegreeKeyQuery>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::delete_degree(&state.db, &key.name, &key.level)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseForm,
    responses(
        (status = 200, description = "Course saved", body = MessageResponse),
        (status = 400, description = "Invalid course fields", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn save_course(
    State(state): State<AppState>,
    Json(form): Json<CourseForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(ReferenceService::save_course(&state.db, &form).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/courses",
    params(CourseKeyQuery),
    responses(
        (status = 200, description = "Course deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Missing key", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Query(key): Query<CourseKeyQuery>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::delete_course(&state.db, &key.course_no)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/instructors",
    request_body = InstructorForm,
    responses(
        (status = 200, description = "Instructor saved", body = MessageResponse),
        (status = 400, description = "Invalid instructor fields", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn save_instructor(
    State(state): State<AppState>,
    Json(form): Json<InstructorForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::save_instructor(&state.db, &form)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/instructors",
    params(InstructorKeyQuery),
    responses(
        (status = 200, description = "Instructor deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Missing key", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn delete_instructor(
    State(state): State<AppState>,
    Query(key): Query<InstructorKeyQuery>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::delete_instructor(&state.db, &key.instructor_id)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/semesters",
    request_body = SemesterForm,
    responses(
        (status = 200, description = "Semester saved", body = MessageResponse),
        (status = 400, description = "Invalid year or term", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn save_semester(
    State(state): State<AppState>,
    Json(form): Json<SemesterForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::save_semester(&state.db, &form)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/semesters",
    params(SemesterKeyQuery),
    responses(
        (status = 200, description = "Semester deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Invalid year or term", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn delete_semester(
    State(state): State<AppState>,
    Query(key): Query<SemesterKeyQuery>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::delete_semester(&state.db, &SemesterForm::from(key))
            .await?
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/objectives",
    request_body = ObjectiveForm,
    responses(
        (status = 200, description = "Objective saved", body = MessageResponse),
        (status = 400, description = "Invalid objective fields", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn save_objective(
    State(state): State<AppState>,
    Json(form): Json<ObjectiveForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::save_objective(&state.db, &form)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/objectives",
    params(ObjectiveKeyQuery),
    responses(
        (status = 200, description = "Objective deleted (or already absent)", body = MessageResponse),
        (status = 400, description = "Missing key", body = ApiError)
    ),
    tag = "Reference data"
)]
pub async fn delete_objective(
    State(state): State<AppState>,
    Query(key): Query<ObjectiveKeyQuery>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        ReferenceService::delete_objective(&state.db, &key.code)
            .await?
            .into(),
    ))
}
