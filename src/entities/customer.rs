use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `oms_customers` table.
///
/// Customers are never deleted; `customer_code` is the immutable
/// human-readable identifier (`CUST-YYYY-NNNNN`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub customer_code: String,

    pub name: String,
    pub phone: String,
    pub email: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,

    /// Communication opt-in flags
    pub whatsapp_opt_in: bool,
    pub sms_opt_in: bool,
    pub email_opt_in: bool,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    #[sea_orm(has_many = "super::customer_measurement::Entity")]
    Measurements,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::customer_measurement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Measurements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
