use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MeasurementUnit;

/// The `oms_customer_measurements` table.
///
/// A fixed-shape record of up to 21 named numeric fields: 15 upper-garment
/// and 6 lower-garment measurements. A customer accumulates a measurement
/// history; orders reference one record as their snapshot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_customer_measurements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub customer_id: Uuid,
    pub unit: MeasurementUnit,

    // Upper-garment measurements
    pub neck: Option<Decimal>,
    pub chest: Option<Decimal>,
    pub waist: Option<Decimal>,
    pub hip: Option<Decimal>,
    pub shoulder_width: Option<Decimal>,
    pub sleeve_length: Option<Decimal>,
    pub bicep: Option<Decimal>,
    pub wrist: Option<Decimal>,
    pub armhole: Option<Decimal>,
    pub shirt_length: Option<Decimal>,
    pub front_neck_depth: Option<Decimal>,
    pub back_neck_depth: Option<Decimal>,
    pub yoke: Option<Decimal>,
    pub cuff: Option<Decimal>,
    pub collar: Option<Decimal>,

    // Lower-garment measurements
    pub trouser_waist: Option<Decimal>,
    pub trouser_length: Option<Decimal>,
    pub inseam: Option<Decimal>,
    pub thigh: Option<Decimal>,
    pub knee: Option<Decimal>,
    pub ankle: Option<Decimal>,

    pub notes: Option<String>,
    pub recorded_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
