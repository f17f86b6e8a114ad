use crate::{
    AppState,
    dtos::response::MessageResponse,
    error::{ApiError, ApiResult},
};
use axum::{Json, extract::State};
use database::services::{
    curriculum::CurriculumService, evaluation::EvaluationService, section::SectionService,
};
use models::form::{
    CopyEvaluationForm, DegreeCourseForm, EvaluationForm, ObjectiveLinkForm, SectionForm,
};

/// Link a course to a degree or change its core flag
#[utoipa::path(
    post,
    path = "/degree-courses",
    request_body = DegreeCourseForm,
    responses(
        (status = 200, description = "Link saved", body = MessageResponse),
        (status = 404, description = "Degree or course not found", body = ApiError),
        (status = 409, description = "Core-course rule violated", body = ApiError)
    ),
    tag = "Curriculum"
)]
pub async fn assign_degree_course(
    State(state): State<AppState>,
    Json(form): Json<DegreeCourseForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        CurriculumService::assign_degree_course(&state.db, &form)
            .await?
            .into(),
    ))
}

/// Unlink a course from a degree
#[utoipa::path(
    delete,
    path = "/degree-courses",
    request_body = DegreeCourseForm,
    responses(
        (status = 200, description = "Link removed (or already absent)", body = MessageResponse),
        (status = 409, description = "Core-course or coverage rule violated", body = ApiError)
    ),
    tag = "Curriculum"
)]
pub async fn remove_degree_course(
    State(state): State<AppState>,
    Json(form): Json<DegreeCourseForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        CurriculumService::remove_degree_course(&state.db, &form)
            .await?
            .into(),
    ))
}

/// Tie an objective to a course within a degree
#[utoipa::path(
    post,
    path = "/objective-links",
    request_body = ObjectiveLinkForm,
    responses(
        (status = 200, description = "Objective linked", body = MessageResponse),
        (status = 404, description = "Degree-course link or objective not found", body = ApiError)
    ),
    tag = "Curriculum"
)]
pub async fn assign_objective_link(
    State(state): State<AppState>,
    Json(form): Json<ObjectiveLinkForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        CurriculumService::assign_objective_link(&state.db, &form)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/objective-links",
    request_body = ObjectiveLinkForm,
    responses(
        (status = 200, description = "Objective unlinked (or already absent)", body = MessageResponse),
        (status = 409, description = "Core-objective or coverage rule violated", body = ApiError)
    ),
    tag = "Curriculum"
)]
pub async fn remove_objective_link(
    State(state): State<AppState>,
    Json(form): Json<ObjectiveLinkForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        CurriculumService::remove_objective_link(&state.db, &form)
            .await?
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/sections",
    request_body = SectionForm,
    responses(
        (status = 200, description = "Section saved", body = MessageResponse),
        (status = 400, description = "Invalid section fields", body = ApiError),
        (status = 404, description = "Course, semester or instructor not found", body = ApiError)
    ),
    tag = "Sections"
)]
pub async fn save_section(
    State(state): State<AppState>,
    Json(form): Json<SectionForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(SectionService::save_section(&state.db, &form).await?.into()))
}

/// Record the outcome of a section against a degree objective
#[utoipa::path(
    post,
    path = "/evaluations",
    request_body = EvaluationForm,
    responses(
        (status = 200, description = "Evaluation saved", body = MessageResponse),
        (status = 404, description = "Section not found", body = ApiError),
        (status = 409, description = "Objective not assessed by this degree and course", body = ApiError),
        (status = 422, description = "Counts exceed the enrolled total", body = ApiError)
    ),
    tag = "Evaluations"
)]
pub async fn save_evaluation(
    State(state): State<AppState>,
    Json(form): Json<EvaluationForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        EvaluationService::save_evaluation(&state.db, &form)
            .await?
            .into(),
    ))
}

/// Copy an evaluation to another degree sharing the objective
#[utoipa::path(
    post,
    path = "/evaluations/copy",
    request_body = CopyEvaluationForm,
    responses(
        (status = 200, description = "Evaluation copied", body = MessageResponse),
        (status = 404, description = "Source evaluation not found", body = ApiError),
        (status = 409, description = "Destination degree does not assess this objective", body = ApiError)
    ),
    tag = "Evaluations"
)]
pub async fn copy_evaluation(
    State(state): State<AppState>,
    Json(form): Json<CopyEvaluationForm>,
) -> ApiResult<MessageResponse> {
    Ok(Json(
        EvaluationService::copy_evaluation(&state.db, &form)
            .await?
            .into(),
    ))
}
