use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OverallQuality;

/// The `oms_quality_checks` table. One immutable row per inspection of an
/// order; re-checks after correction append new rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_quality_checks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Uuid,
    pub assignment_id: Option<Uuid>,
    pub checked_by: Uuid,

    /// 1-5 ratings per inspection axis
    pub stitching_quality: i32,
    pub finishing_quality: i32,
    pub measurement_accuracy: i32,
    pub design_adherence: i32,
    pub overall_quality: OverallQuality,

    /// Derived verdict; see `services::quality_checks::evaluate`
    pub passed: bool,

    /// Defect tags, persisted as a JSON array of strings
    pub defects: Json,
    pub corrective_actions: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::order_assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::order_assignment::Column::Id"
    )]
    Assignment,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::order_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
