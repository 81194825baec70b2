use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{OrderPriority, OrderStatus, OrderType, WorkflowStage};

/// The `oms_orders` table.
///
/// Two lifecycle dimensions live on every row: the customer-facing `status`
/// and the internal `workflow_stage` (unset until first assignment). Both
/// are only ever written together through [`crate::workflow`], inside one
/// transaction, alongside a status-history row when `status` changes.
///
/// `balance_amount` is derived: every financial write recomputes it as
/// `total_amount - advance_paid`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Human-readable order number (`ORD-<store>-YYYYMMDD-NNN`)
    #[sea_orm(unique)]
    pub order_number: String,

    pub customer_id: Uuid,
    pub store_id: Uuid,

    pub order_type: OrderType,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub workflow_stage: Option<WorkflowStage>,

    pub garment_type: String,
    pub fabric_details: Option<String>,
    pub special_instructions: Option<String>,

    /// Measurement snapshot taken at order time, if any
    pub measurement_id: Option<Uuid>,

    pub total_amount: Decimal,
    pub advance_paid: Decimal,
    pub balance_amount: Decimal,

    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: DateTime<Utc>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub fitting_date: Option<DateTime<Utc>>,
    pub advance_paid_at: Option<DateTime<Utc>>,
    pub balance_settled_at: Option<DateTime<Utc>>,

    pub assigned_tailor_id: Option<Uuid>,
    pub stitching_started_at: Option<DateTime<Utc>>,
    pub stitching_completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,

    /// Optimistic-concurrency token, incremented on every update
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
    #[sea_orm(has_many = "super::order_status_history::Entity")]
    StatusHistory,
    #[sea_orm(has_many = "super::order_assignment::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::quality_check::Entity")]
    QualityChecks,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::order_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl Related<super::order_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::quality_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityChecks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
