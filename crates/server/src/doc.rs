use utoipa::OpenApi;

/// API Documentation; paths are collected from the router
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Health", description = "Service status"),
        (name = "Reference data", description = "Degrees, courses, instructors, semesters and objectives"),
        (name = "Curriculum", description = "Degree-course links and their objectives"),
        (name = "Sections", description = "Course offerings per semester"),
        (name = "Evaluations", description = "Outcome records per section and objective"),
        (name = "Reports", description = "Read-only curriculum reports"),
        (name = "Catalog", description = "Listings for selection lists and worksheets"),
    ),
    info(
        title = "Curriculum API",
        version = "1.0.0",
        description = "Degree curriculum and learning-outcome tracking",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
