use super::begin_serializable;
use crate::{
    entities::{courses, degrees, instructors, objectives, semesters},
    error::MutationResult,
};
use log::info;
use models::form::{
    CourseForm, DegreeForm, DegreeKey, InstructorForm, ObjectiveForm, SemesterForm, required,
};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DeleteResult, EntityTrait, sea_query::OnConflict,
};

/// Maintenance of the reference tables: degrees, courses, instructors,
/// semesters and objectives.
///
/// Deletes cascade to dependent link, section and evaluation rows through the
/// schema's foreign keys.
pub struct ReferenceService;

impl ReferenceService {
    pub async fn save_degree(db: &DatabaseConnection, form: &DegreeForm) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        degrees::Entity::insert(degrees::ActiveModel {
            name: Set(input.key.name.clone()),
            level: Set(input.key.level.clone()),
            description: Set(input.description),
        })
        .on_conflict(
            OnConflict::columns([degrees::Column::Name, degrees::Column::Level])
                .update_column(degrees::Column::Description)
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!("Saved degree {}", input.key);
        Ok(format!("Degree {} saved.", input.key))
    }

    pub async fn delete_degree(db: &DatabaseConnection, name: &str, level: &str) -> MutationResult {
        let key = DegreeKey::parse(name, level)?;
        let txn = begin_serializable(db).await?;

        let result = degrees::Entity::delete_by_id((key.name.clone(), key.level.clone()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(deleted("Degree", &key.to_string(), result))
    }

    pub async fn save_course(db: &DatabaseConnection, form: &CourseForm) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        courses::Entity::insert(courses::ActiveModel {
            course_no: Set(input.course_no.clone()),
            title: Set(input.title),
            description: Set(input.description),
        })
        .on_conflict(
            OnConflict::column(courses::Column::CourseNo)
                .update_columns([courses::Column::Title, courses::Column::Description])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!("Saved course {}", input.course_no);
        Ok(format!("Course {} saved.", input.course_no))
    }

    pub async fn delete_course(db: &DatabaseConnection, course_no: &str) -> MutationResult {
        let course_no = required("course_no", course_no)?;
        let txn = begin_serializable(db).await?;

        let result = courses::Entity::delete_by_id(course_no.clone())
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(deleted("Course", &course_no, result))
    }

    pub async fn save_instructor(db: &DatabaseConnection, form: &InstructorForm) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        instructors::Entity::insert(instructors::ActiveModel {
            instructor_id: Set(input.instructor_id.clone()),
            name: Set(input.name),
        })
        .on_conflict(
            OnConflict::column(instructors::Column::InstructorId)
                .update_column(instructors::Column::Name)
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!("Saved instructor {}", input.instructor_id);
        Ok(format!("Instructor {} saved.", input.instructor_id))
    }

    pub async fn delete_instructor(db: &DatabaseConnection, instructor_id: &str) -> MutationResult {
        let instructor_id = required("instructor_id", instructor_id)?;
        let txn = begin_serializable(db).await?;

        let result = instructors::Entity::delete_by_id(instructor_id.clone())
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(deleted("Instructor", &instructor_id, result))
    }

    /// Semesters carry no payload, so saving an existing one changes nothing
    pub async fn save_semester(db: &DatabaseConnection, form: &SemesterForm) -> MutationResult {
        let semester = form.parse()?;
        let txn = begin_serializable(db).await?;

        let existing = semesters::Entity::find_by_id((semester.year, semester.term.to_string()))
            .one(&txn)
            .await?;

        if existing.is_none() {
            semesters::Entity::insert(semesters::ActiveModel {
                year: Set(semester.year),
                term: Set(semester.term.to_string()),
            })
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Saved semester {semester}");
        Ok(format!("Semester {} {} saved.", semester.year, semester.term))
    }

    pub async fn delete_semester(db: &DatabaseConnection, form: &SemesterForm) -> MutationResult {
        let semester = form.parse()?;
        let txn = begin_serializable(db).await?;

        let result = semesters::Entity::delete_by_id((semester.year, semester.term.to_string()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(deleted("Semester", &semester.to_string(), result))
    }

    pub async fn save_objective(db: &DatabaseConnection, form: &ObjectiveForm) -> MutationResult {
        let input = form.parse()?;
        let txn = begin_serializable(db).await?;

        objectives::Entity::insert(objectives::ActiveModel {
            code: Set(input.code.clone()),
            title: Set(input.title),
            description: Set(input.description),
        })
        .on_conflict(
            OnConflict::column(objectives::Column::Code)
                .update_columns([objectives::Column::Title, objectives::Column::Description])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        info!("Saved objective {}", input.code);
        Ok(format!("Objective {} saved.", input.code))
    }

    pub async fn delete_objective(db: &DatabaseConnection, code: &str) -> MutationResult {
        let code = required("code", code)?;
        let txn = begin_serializable(db).await?;

        let result = objectives::Entity::delete_by_id(code.clone())
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(deleted("Objective", &code, result))
    }
}

/// Deleting a missing row still succeeds
fn deleted(entity: &str, key: &str, result: DeleteResult) -> String {
    if result.rows_affected == 0 {
        format!("{entity} {key} did not exist; nothing to delete.")
    } else {
        info!("Deleted {} {key}", entity.to_lowercase());
        format!("{entity} {key} deleted.")
    }
}
