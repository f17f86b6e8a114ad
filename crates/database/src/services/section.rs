use super::{begin_serializable, guards};
use crate::{entities::sections, error::MutationResult};
use log::info;
use models::form::SectionForm;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};

pub struct SectionService;

impl SectionService {
    /// Creates a section or updates its instructor and enrollment
    pub async fn save_section(db: &DatabaseConnection, form: &SectionForm) -> MutationResult {
        let input = form.parse()?;
        let key = &input.key;
        let txn = begin_serializable(db).await?;

        guards::require_course(&txn, &key.course_no).await?;
        guards::require_semester(&txn, key.semester).await?;
        guards::require_instructor(&txn, &input.instructor_id).await?;

        sections::Entity::insert(sections::ActiveModel {
            course_no: Set(key.course_no.clone()),
            year: Set(key.semester.year),
            term: Set(key.semester.term.to_string()),
            section_no: Set(key.section_no.clone()),
            instructor_id: Set(input.instructor_id.clone()),
            enrolled_count: Set(input.enrolled_count),
        })
        .on_conflict(
            OnConflict::columns([
                sections::Column::CourseNo,
                sections::Column::Year,
                sections::Column::Term,
                sections::Column::SectionNo,
            ])
            .update_columns([
                sections::Column::InstructorId,
                sections::Column::EnrolledCount,
            ])
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Saved {key} taught by {} with {} enrolled",
            input.instructor_id, input.enrolled_count
        );
        Ok("Section saved.".to_string())
    }
}
