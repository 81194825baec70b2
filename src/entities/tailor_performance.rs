use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `oms_tailor_performance` table. Monthly aggregate per tailor,
/// upserted by the assignment and quality-check services; `period` is the
/// first day of the month the row covers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_tailor_performance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tailor_id: Uuid,
    pub period: NaiveDate,

    pub orders_completed: i32,
    pub checks_passed: i32,
    pub checks_failed: i32,

    /// Mean quality-check grade recorded within the period, 0-5
    pub average_rating: Decimal,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tailor::Entity",
        from = "Column::TailorId",
        to = "super::tailor::Column::Id"
    )]
    Tailor,
}

impl Related<super::tailor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tailor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
