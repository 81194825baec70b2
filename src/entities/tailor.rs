use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SkillLevel;

/// The `oms_tailors` table. Wraps a user with tailoring-specific
/// attributes and the workload counters maintained by the assignment
/// engine: `current_order_count` moves +1 on assign / -1 on completion,
/// `total_orders_completed` grows monotonically, and `quality_rating` is a
/// running mean over recorded quality-check grades.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_tailors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    /// Human-readable code (`TLRNNNN`), verified unique at generation time
    #[sea_orm(unique)]
    pub tailor_code: String,

    /// Set of specializations, persisted as a JSON array of strings
    pub specializations: Json,
    pub skill_level: SkillLevel,
    pub hourly_rate: Option<Decimal>,

    pub is_available: bool,
    pub max_concurrent_orders: i32,
    pub current_order_count: i32,
    pub total_orders_completed: i32,

    /// Running mean of quality-check grades, 0-5
    pub quality_rating: Decimal,
    /// Number of quality checks folded into `quality_rating`
    pub quality_checks_count: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::order_assignment::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::tailor_performance::Entity")]
    Performance,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::tailor_performance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Performance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
