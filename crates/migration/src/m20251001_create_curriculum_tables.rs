use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create degrees table
        manager
            .create_table(
                Table::create()
                    .table(Degrees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Degrees::Name).string().not_null())
                    .col(ColumnDef::new(Degrees::Level).string().not_null())
                    .col(ColumnDef::new(Degrees::Description).text())
                    .primary_key(Index::create().col(Degrees::Name).col(Degrees::Level))
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseNo)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .to_owned(),
            )
            .await?;

        // Create instructors table
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::InstructorId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Semesters::Year).integer().not_null())
                    .col(ColumnDef::new(Semesters::Term).string().not_null())
                    .primary_key(Index::create().col(Semesters::Year).col(Semesters::Term))
                    .to_owned(),
            )
            .await?;

        // Create objectives table
        manager
            .create_table(
                Table::create()
                    .table(Objectives::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Objectives::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Objectives::Title).string().not_null())
                    .col(ColumnDef::new(Objectives::Description).text())
                    .to_owned(),
            )
            .await?;

        // Create degree_courses junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(DegreeCourses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DegreeCourses::DegreeName).string().not_null())
                    .col(
                        ColumnDef::new(DegreeCourses::DegreeLevel)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DegreeCourses::CourseNo).string().not_null())
                    .col(
                        ColumnDef::new(DegreeCourses::IsCore)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .primary_key(
                        Index::create()
                            .col(DegreeCourses::DegreeName)
                            .col(DegreeCourses::DegreeLevel)
                            .col(DegreeCourses::CourseNo),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-degree_courses-degree")
                            .from_tbl(DegreeCourses::Table)
                            .from_col(DegreeCourses::DegreeName)
                            .from_col(DegreeCourses::DegreeLevel)
                            .to_tbl(Degrees::Table)
                            .to_col(Degrees::Name)
                            .to_col(Degrees::Level)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-degree_courses-course_no")
                            .from(DegreeCourses::Table, DegreeCourses::CourseNo)
                            .to(Courses::Table, Courses::CourseNo)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create degree_course_objectives junction table
        manager
            .create_table(
                Table::create()
                    .table(DegreeCourseObjectives::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DegreeCourseObjectives::DegreeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreeCourseObjectives::DegreeLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreeCourseObjectives::CourseNo)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DegreeCourseObjectives::ObjectiveCode)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DegreeCourseObjectives::DegreeName)
                            .col(DegreeCourseObjectives::DegreeLevel)
                            .col(DegreeCourseObjectives::CourseNo)
                            .col(DegreeCourseObjectives::ObjectiveCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-degree_course_objectives-degree_course")
                            .from_tbl(DegreeCourseObjectives::Table)
                            .from_col(DegreeCourseObjectives::DegreeName)
                            .from_col(DegreeCourseObjectives::DegreeLevel)
                            .from_col(DegreeCourseObjectives::CourseNo)
                            .to_tbl(DegreeCourses::Table)
                            .to_col(DegreeCourses::DegreeName)
                            .to_col(DegreeCourses::DegreeLevel)
                            .to_col(DegreeCourses::CourseNo)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-degree_course_objectives-objective_code")
                            .from(
                                DegreeCourseObjectives::Table,
                                DegreeCourseObjectives::ObjectiveCode,
                            )
                            .to(Objectives::Table, Objectives::Code)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sections table
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sections::CourseNo).string().not_null())
                    .col(ColumnDef::new(Sections::Year).integer().not_null())
                    .col(ColumnDef::new(Sections::Term).string().not_null())
                    .col(ColumnDef::new(Sections::SectionNo).string().not_null())
                    .col(ColumnDef::new(Sections::InstructorId).string().not_null())
                    .col(
                        ColumnDef::new(Sections::EnrolledCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(Sections::CourseNo)
                            .col(Sections::Year)
                            .col(Sections::Term)
                            .col(Sections::SectionNo),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sections-course_no")
                            .from(Sections::Table, Sections::CourseNo)
                            .to(Courses::Table, Courses::CourseNo)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sections-semester")
                            .from_tbl(Sections::Table)
                            .from_col(Sections::Year)
                            .from_col(Sections::Term)
                            .to_tbl(Semesters::Table)
                            .to_col(Semesters::Year)
                            .to_col(Semesters::Term)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sections-instructor_id")
                            .from(Sections::Table, Sections::InstructorId)
                            .to(Instructors::Table, Instructors::InstructorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create evaluations table
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Evaluations::CourseNo).string().not_null())
                    .col(ColumnDef::new(Evaluations::Year).integer().not_null())
                    .col(ColumnDef::new(Evaluations::Term).string().not_null())
                    .col(ColumnDef::new(Evaluations::SectionNo).string().not_null())
                    .col(ColumnDef::new(Evaluations::DegreeName).string().not_null())
                    .col(ColumnDef::new(Evaluations::DegreeLevel).string().not_null())
                    .col(
                        ColumnDef::new(Evaluations::ObjectiveCode)
                            .string()
                            .not_null(),
                    )
                    // Outcome measures, each independently nullable
                    .col(ColumnDef::new(Evaluations::MethodLabel).string())
                    .col(ColumnDef::new(Evaluations::ACount).integer())
                    .col(ColumnDef::new(Evaluations::BCount).integer())
                    .col(ColumnDef::new(Evaluations::CCount).integer())
                    .col(ColumnDef::new(Evaluations::FCount).integer())
                    .col(ColumnDef::new(Evaluations::ImprovementText).text())
                    .primary_key(
                        Index::create()
                            .col(Evaluations::CourseNo)
                            .col(Evaluations::Year)
                            .col(Evaluations::Term)
                            .col(Evaluations::SectionNo)
                            .col(Evaluations::DegreeName)
                            .col(Evaluations::DegreeLevel)
                            .col(Evaluations::ObjectiveCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-evaluations-section")
                            .from_tbl(Evaluations::Table)
                            .from_col(Evaluations::CourseNo)
                            .from_col(Evaluations::Year)
                            .from_col(Evaluations::Term)
                            .from_col(Evaluations::SectionNo)
                            .to_tbl(Sections::Table)
                            .to_col(Sections::CourseNo)
                            .to_col(Sections::Year)
                            .to_col(Sections::Term)
                            .to_col(Sections::SectionNo)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-evaluations-degree_course_objective")
                            .from_tbl(Evaluations::Table)
                            .from_col(Evaluations::DegreeName)
                            .from_col(Evaluations::DegreeLevel)
                            .from_col(Evaluations::CourseNo)
                            .from_col(Evaluations::ObjectiveCode)
                            .to_tbl(DegreeCourseObjectives::Table)
                            .to_col(DegreeCourseObjectives::DegreeName)
                            .to_col(DegreeCourseObjectives::DegreeLevel)
                            .to_col(DegreeCourseObjectives::CourseNo)
                            .to_col(DegreeCourseObjectives::ObjectiveCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DegreeCourseObjectives::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DegreeCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Objectives::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Degrees::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Degrees {
    Table,
    Name,
    Level,
    Description,
}

#[derive(Iden)]
enum Courses {
    Table,
    CourseNo,
    Title,
    Description,
}

#[derive(Iden)]
enum Instructors {
    Table,
    InstructorId,
    Name,
}

#[derive(Iden)]
enum Semesters {
    Table,
    Year,
    Term,
}

#[derive(Iden)]
enum Objectives {
    Table,
    Code,
    Title,
    Description,
}

#[derive(Iden)]
enum DegreeCourses {
    Table,
    DegreeName,
    DegreeLevel,
    CourseNo,
    IsCore,
}

#[derive(Iden)]
enum DegreeCourseObjectives {
    Table,
    DegreeName,
    DegreeLevel,
    CourseNo,
    ObjectiveCode,
}

#[derive(Iden)]
enum Sections {
    Table,
    CourseNo,
    Year,
    Term,
    SectionNo,
    InstructorId,
    EnrolledCount,
}

#[derive(Iden)]
enum Evaluations {
    Table,
    CourseNo,
    Year,
    Term,
    SectionNo,
    DegreeName,
    DegreeLevel,
    ObjectiveCode,
    MethodLabel,
    ACount,
    BCount,
    CCount,
    FCount,
    ImprovementText,
}
