use models::outcome::OutcomeMeasures;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome record for one section against one (degree, objective) pairing
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_no: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub term: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub section_no: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub degree_level: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub objective_code: String,
    pub method_label: Option<String>,
    pub a_count: Option<i32>,
    pub b_count: Option<i32>,
    pub c_count: Option<i32>,
    pub f_count: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub improvement_text: Option<String>,
}

impl Model {
    pub fn measures(&self) -> OutcomeMeasures {
        OutcomeMeasures {
            method_label: self.method_label.clone(),
            a_count: self.a_count,
            b_count: self.b_count,
            c_count: self.c_count,
            f_count: self.f_count,
            improvement_text: self.improvement_text.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
