use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Section histories are looked up per instructor
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_instructor_id")
                    .table(Sections::Table)
                    .col(Sections::InstructorId)
                    .to_owned(),
            )
            .await?;

        // Rollups and worksheets scan one semester at a time
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_year_term")
                    .table(Sections::Table)
                    .col(Sections::Year)
                    .col(Sections::Term)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_year_term")
                    .table(Evaluations::Table)
                    .col(Evaluations::Year)
                    .col(Evaluations::Term)
                    .to_owned(),
            )
            .await?;

        // Objective coverage guard counts pairs per (degree, objective)
        manager
            .create_index(
                Index::create()
                    .name("idx_degree_course_objectives_objective")
                    .table(DegreeCourseObjectives::Table)
                    .col(DegreeCourseObjectives::DegreeName)
                    .col(DegreeCourseObjectives::DegreeLevel)
                    .col(DegreeCourseObjectives::ObjectiveCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_degree_course_objectives_objective")
                    .table(DegreeCourseObjectives::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_evaluations_year_term")
                    .table(Evaluations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sections_year_term")
                    .table(Sections::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sections_instructor_id")
                    .table(Sections::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Sections {
    Table,
    Year,
    Term,
    InstructorId,
}

#[derive(Iden)]
enum Evaluations {
    Table,
    Year,
    Term,
}

#[derive(Iden)]
enum DegreeCourseObjectives {
    Table,
    DegreeName,
    DegreeLevel,
    ObjectiveCode,
}
