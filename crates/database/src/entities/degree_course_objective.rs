use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table: an objective assessed for a course within one degree
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "degree_course_objectives")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_level: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_no: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub objective_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::objective::Entity",
        from = "Column::ObjectiveCode",
        to = "super::objective::Column::Code"
    )]
    Objective,
}

impl Related<super::objective::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Objective.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
