use super::{begin_serializable, guards};
use crate::{
    entities::{degree_course_objectives, degree_courses, evaluations},
    error::{CoreError, Invariant, MutationResult},
};
use log::info;
use models::form::{DegreeCourseForm, DegreeKey, ObjectiveLinkForm};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, sea_query::OnConflict,
};

/// Degree-course links and the objectives each linked course assesses.
///
/// Every write checks the core-course, core-objective and objective-coverage
/// rules against the other rows of the degree before touching anything.
pub struct CurriculumService;

impl CurriculumService {
    /// Links a course to a degree, or changes its core flag when already linked
    pub async fn assign_degree_course(
        db: &DatabaseConnection,
        form: &DegreeCourseForm,
    ) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        guards::require_degree(&txn, &input.degree).await?;
        guards::require_course(&txn, &input.course_no).await?;

        let existing = guards::find_degree_course(&txn, &input.degree, &input.course_no).await?;

        let demoting = !input.is_core && existing.as_ref().is_some_and(|link| link.is_core);
        if demoting
            && guards::other_core_courses(&txn, &input.degree, &input.course_no).await? == 0
        {
            return Err(guards::reject(
                Invariant::CoreCourseMinimum,
                format!("{} is the only core course of {}", input.course_no, input.degree),
            ));
        }

        if input.is_core
            && guards::course_objective_count(&txn, &input.degree, &input.course_no, None).await?
                == 0
        {
            return Err(guards::reject(
                Invariant::CoreRequiresObjective,
                format!("{} has no objectives for {}", input.course_no, input.degree),
            ));
        }

        degree_courses::Entity::insert(degree_courses::ActiveModel {
            degree_name: Set(input.degree.name.clone()),
            degree_level: Set(input.degree.level.clone()),
            course_no: Set(input.course_no.clone()),
            is_core: Set(input.is_core),
        })
        .on_conflict(
            OnConflict::columns([
                degree_courses::Column::DegreeName,
                degree_courses::Column::DegreeLevel,
                degree_courses::Column::CourseNo,
            ])
            .update_column(degree_courses::Column::IsCore)
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Linked {} to {} (core: {})",
            input.course_no, input.degree, input.is_core
        );
        Ok("Degree-course link saved.".to_string())
    }

    /// Unlinks a course from a degree along with its objective links and the
    /// evaluations recorded against them. The core flag on the form is ignored.
    pub async fn remove_degree_course(
        db: &DatabaseConnection,
        form: &DegreeCourseForm,
    ) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        let Some(link) = guards::find_degree_course(&txn, &input.degree, &input.course_no).await?
        else {
            return Ok(format!(
                "{} was not linked to {}; nothing to remove.",
                input.course_no, input.degree
            ));
        };

        if link.is_core
            && guards::other_core_courses(&txn, &input.degree, &input.course_no).await? == 0
        {
            return Err(guards::reject(
                Invariant::CoreCourseMinimum,
                format!(
                    "cannot remove {}, the last core course of {}",
                    input.course_no, input.degree
                ),
            ));
        }

        let links = degree_course_objectives::Entity::find()
            .filter(degree_course_objectives::Column::DegreeName.eq(input.degree.name.as_str()))
            .filter(degree_course_objectives::Column::DegreeLevel.eq(input.degree.level.as_str()))
            .filter(degree_course_objectives::Column::CourseNo.eq(input.course_no.as_str()))
            .all(&txn)
            .await?;

        for objective_link in &links {
            if guards::other_courses_for_objective(
                &txn,
                &input.degree,
                &objective_link.objective_code,
                &input.course_no,
            )
            .await?
                == 0
            {
                return Err(guards::reject(
                    Invariant::ObjectiveCoverage,
                    format!(
                        "{} is the only course covering objective {} in {}",
                        input.course_no, objective_link.objective_code, input.degree
                    ),
                ));
            }
        }

        delete_evaluations(&txn, &input.degree, &input.course_no, None).await?;

        degree_course_objectives::Entity::delete_many()
            .filter(degree_course_objectives::Column::DegreeName.eq(input.degree.name.as_str()))
            .filter(degree_course_objectives::Column::DegreeLevel.eq(input.degree.level.as_str()))
            .filter(degree_course_objectives::Column::CourseNo.eq(input.course_no.as_str()))
            .exec(&txn)
            .await?;

        degree_courses::Entity::delete_by_id((
            input.degree.name.clone(),
            input.degree.level.clone(),
            input.course_no.clone(),
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Unlinked {} from {} ({} objective links dropped)",
            input.course_no,
            input.degree,
            links.len()
        );
        Ok("Degree-course link removed.".to_string())
    }

    /// Ties an objective to a course the degree already owns; re-linking is a no-op
    pub async fn assign_objective_link(
        db: &DatabaseConnection,
        form: &ObjectiveLinkForm,
    ) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        if guards::find_degree_course(&txn, &input.degree, &input.course_no)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found(
                "Degree-course link",
                format!("{} / {}", input.degree, input.course_no),
            ));
        }
        guards::require_objective(&txn, &input.objective_code).await?;

        let existing = guards::find_objective_link(
            &txn,
            &input.degree,
            &input.course_no,
            &input.objective_code,
        )
        .await?;

        if existing.is_none() {
            degree_course_objectives::Entity::insert(degree_course_objectives::ActiveModel {
                degree_name: Set(input.degree.name.clone()),
                degree_level: Set(input.degree.level.clone()),
                course_no: Set(input.course_no.clone()),
                objective_code: Set(input.objective_code.clone()),
            })
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;
        info!(
            "Linked objective {} to {} in {}",
            input.objective_code, input.course_no, input.degree
        );
        Ok("Objective linked to course.".to_string())
    }

    /// Drops one objective from a course, with the evaluations recorded against it
    pub async fn remove_objective_link(
        db: &DatabaseConnection,
        form: &ObjectiveLinkForm,
    ) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        if guards::find_objective_link(
            &txn,
            &input.degree,
            &input.course_no,
            &input.objective_code,
        )
        .await?
        .is_none()
        {
            return Ok(format!(
                "Objective {} was not linked to {} in {}; nothing to remove.",
                input.objective_code, input.course_no, input.degree
            ));
        }

        let is_core = guards::find_degree_course(&txn, &input.degree, &input.course_no)
            .await?
            .is_some_and(|link| link.is_core);

        if is_core
            && guards::course_objective_count(
                &txn,
                &input.degree,
                &input.course_no,
                Some(&input.objective_code),
            )
            .await?
                == 0
        {
            return Err(guards::reject(
                Invariant::CoreObjectiveMinimum,
                format!(
                    "{} is core for {} and {} is its last objective",
                    input.course_no, input.degree, input.objective_code
                ),
            ));
        }

        if guards::other_courses_for_objective(
            &txn,
            &input.degree,
            &input.objective_code,
            &input.course_no,
        )
        .await?
            == 0
        {
            return Err(guards::reject(
                Invariant::ObjectiveCoverage,
                format!(
                    "objective {} is only covered by {} in {}",
                    input.objective_code, input.course_no, input.degree
                ),
            ));
        }

        delete_evaluations(
            &txn,
            &input.degree,
            &input.course_no,
            Some(&input.objective_code),
        )
        .await?;

        degree_course_objectives::Entity::delete_by_id((
            input.degree.name.clone(),
            input.degree.level.clone(),
            input.course_no.clone(),
            input.objective_code.clone(),
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Removed objective {} from {} in {}",
            input.objective_code, input.course_no, input.degree
        );
        Ok("Objective removed from course.".to_string())
    }
}

/// Evaluations of a (degree, course), optionally narrowed to one objective
async fn delete_evaluations<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    course_no: &str,
    objective_code: Option<&str>,
) -> Result<u64, DbErr> {
    let mut query = evaluations::Entity::delete_many()
        .filter(evaluations::Column::DegreeName.eq(degree.name.as_str()))
        .filter(evaluations::Column::DegreeLevel.eq(degree.level.as_str()))
        .filter(evaluations::Column::CourseNo.eq(course_no));

    if let Some(objective_code) = objective_code {
        query = query.filter(evaluations::Column::ObjectiveCode.eq(objective_code));
    }

    Ok(query.exec(conn).await?.rows_affected)
}
