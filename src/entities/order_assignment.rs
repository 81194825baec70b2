use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AssignmentStatus;

/// The `oms_order_assignments` table. Join entity linking one order to the
/// tailor executing it; terminal at `completed`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_order_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Uuid,
    pub tailor_id: Uuid,
    pub status: AssignmentStatus,

    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Free-text estimate supplied by the assigner, e.g. "3 days"
    pub estimated_completion_time: Option<String>,
    pub notes: Option<String>,
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
        belongs_to = "super::tailor::Entity",
        from = "Column::TailorId",
        to = "super::tailor::Column::Id"
    )]
    Tailor,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::tailor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tailor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
