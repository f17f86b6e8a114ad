pub mod catalog;
pub mod curriculum;
pub mod health;
pub mod reference;
pub mod report;

use crate::{AppState, doc::ApiDoc};
use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// All endpoints, with Swagger UI served at `/docs`
pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        // reference data: catalog listing plus maintenance on the same path
        .routes(routes!(
            catalog::list_degrees,
            reference::save_degree,
            reference::delete_degree
        ))
        .routes(routes!(
            catalog::list_courses,
            reference::save_course,
            reference::delete_course
        ))
        .routes(routes!(
            catalog::list_instructors,
            reference::save_instructor,
            reference::delete_instructor
        ))
        .routes(routes!(
            catalog::list_semesters,
            reference::save_semester,
            reference::delete_semester
        ))
        .routes(routes!(
            catalog::list_objectives,
            reference::save_objective,
            reference::delete_objective
        ))
        .routes(routes!(catalog::degree_course_view))
        .routes(routes!(catalog::degree_courses))
        .routes(routes!(catalog::course_objectives))
        .routes(routes!(catalog::evaluation_worksheet))
        .routes(routes!(
            curriculum::assign_degree_course,
            curriculum::remove_degree_course
        ))
        .routes(routes!(
            curriculum::assign_objective_link,
            curriculum::remove_objective_link
        ))
        .routes(routes!(curriculum::save_section))
        .routes(routes!(curriculum::save_evaluation))
        .routes(routes!(curriculum::copy_evaluation))
        .routes(routes!(report::degree_snapshot))
        .routes(routes!(report::course_sections))
        .routes(routes!(report::instructor_sections))
        .routes(routes!(report::evaluation_status))
        .routes(routes!(report::non_f_sections))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .with_state(state)
}
