use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table: a degree owns a course, optionally as a core requirement
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "degree_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_level: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_no: String,
    pub is_core: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseNo",
        to = "super::course::Column::CourseNo"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
