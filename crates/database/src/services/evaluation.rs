use super::{begin_serializable, guards};
use crate::{
    entities::{evaluations, sections},
    error::{CoreError, Invariant, MutationResult},
};
use log::{info, warn};
use models::{
    form::{CopyEvaluationForm, DegreeKey, EvaluationForm, EvaluationKey, SectionKey},
    outcome::OutcomeMeasures,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, sea_query::OnConflict,
};

pub struct EvaluationService;

impl EvaluationService {
    /// Records the outcome of a section against one of its degree objectives
    pub async fn save_evaluation(db: &DatabaseConnection, form: &EvaluationForm) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        let section = find_section(&txn, &input.key.section).await?;
        require_objective_link(&txn, &input.key.degree, &input.key).await?;
        check_count_bound(&input.measures, &section)?;

        upsert(&txn, &input.key, &input.key.degree, input.measures).await?;

        txn.commit().await?;
        info!(
            "Saved evaluation of {} for {} objective {}",
            input.key.section, input.key.degree, input.key.objective_code
        );
        Ok("Evaluation saved.".to_string())
    }

    /// Duplicates an existing evaluation's measures onto another degree that
    /// assesses the same objective for the course
    pub async fn copy_evaluation(
        db: &DatabaseConnection,
        form: &CopyEvaluationForm,
    ) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        let source = evaluations::Entity::find()
            .filter(key_condition(&input.source, &input.source.degree))
            .one(&txn)
            .await?
            .ok_or_else(|| CoreError::not_found("Evaluation", describe(&input.source)))?;

        require_objective_link(&txn, &input.target, &input.source).await?;

        let measures = source.measures();
        let section = find_section(&txn, &input.source.section).await?;
        check_count_bound(&measures, &section)?;

        upsert(&txn, &input.source, &input.target, measures).await?;

        txn.commit().await?;
        info!(
            "Copied evaluation of {} objective {} from {} to {}",
            input.source.section, input.source.objective_code, input.source.degree, input.target
        );
        Ok("Evaluation copied to the selected degree.".to_string())
    }
}

fn describe(key: &EvaluationKey) -> String {
    format!("{} / {} / {}", key.section, key.degree, key.objective_code)
}

/// Matches the evaluation row of `key`, with the degree columns taken from `degree`
fn key_condition(key: &EvaluationKey, degree: &DegreeKey) -> Condition {
    Condition::all()
        .add(evaluations::Column::CourseNo.eq(key.section.course_no.as_str()))
        .add(evaluations::Column::Year.eq(key.section.semester.year))
        .add(evaluations::Column::Term.eq(key.section.semester.term.as_str()))
        .add(evaluations::Column::SectionNo.eq(key.section.section_no.as_str()))
        .add(evaluations::Column::DegreeName.eq(degree.name.as_str()))
        .add(evaluations::Column::DegreeLevel.eq(degree.level.as_str()))
        .add(evaluations::Column::ObjectiveCode.eq(key.objective_code.as_str()))
}

async fn find_section<C: ConnectionTrait>(
    conn: &C,
    key: &SectionKey,
) -> Result<sections::Model, CoreError> {
    sections::Entity::find_by_id((
        key.course_no.clone(),
        key.semester.year,
        key.semester.term.to_string(),
        key.section_no.clone(),
    ))
    .one(conn)
    .await?
    .ok_or_else(|| CoreError::not_found("Section", key))
}

async fn require_objective_link<C: ConnectionTrait>(
    conn: &C,
    degree: &DegreeKey,
    key: &EvaluationKey,
) -> Result<(), CoreError> {
    let link = guards::find_objective_link(
        conn,
        degree,
        &key.section.course_no,
        &key.objective_code,
    )
    .await?;

    if link.is_none() {
        return Err(guards::reject(
            Invariant::EvaluationRequiresObjectiveLink,
            format!(
                "{} does not assess objective {} in {}",
                key.section.course_no, key.objective_code, degree
            ),
        ));
    }
    Ok(())
}

fn check_count_bound(measures: &OutcomeMeasures, section: &sections::Model) -> Result<(), CoreError> {
    if measures.fits_enrollment(section.enrolled_count) {
        return Ok(());
    }

    let error = CoreError::ConstraintConflict(format!(
        "Counts cannot exceed the enrolled total: {} graded, {} enrolled",
        measures.supplied_total().unwrap_or_default(),
        section.enrolled_count
    ));
    warn!("Rejected mutation: {error}");
    Err(error)
}

/// Inserts or overwrites the measures stored at `key` under `degree`
async fn upsert<C: ConnectionTrait>(
    conn: &C,
    key: &EvaluationKey,
    degree: &DegreeKey,
    measures: OutcomeMeasures,
) -> Result<(), CoreError> {
    evaluations::Entity::insert(evaluations::ActiveModel {
        course_no: Set(key.section.course_no.clone()),
        year: Set(key.section.semester.year),
        term: Set(key.section.semester.term.to_string()),
        section_no: Set(key.section.section_no.clone()),
        degree_name: Set(degree.name.clone()),
        degree_level: Set(degree.level.clone()),
        objective_code: Set(key.objective_code.clone()),
        method_label: Set(measures.method_label),
        a_count: Set(measures.a_count),
        b_count: Set(measures.b_count),
        c_count: Set(measures.c_count),
        f_count: Set(measures.f_count),
        improvement_text: Set(measures.improvement_text),
    })
    .on_conflict(
        OnConflict::columns([
            evaluations::Column::CourseNo,
            evaluations::Column::Year,
            evaluations::Column::Term,
            evaluations::Column::SectionNo,
            evaluations::Column::DegreeName,
            evaluations::Column::DegreeLevel,
            evaluations::Column::ObjectiveCode,
        ])
        .update_columns([
            evaluations::Column::MethodLabel,
            evaluations::Column::ACount,
            evaluations::Column::BCount,
            evaluations::Column::CCount,
            evaluations::Column::FCount,
            evaluations::Column::ImprovementText,
        ])
        .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    Ok(())
}
