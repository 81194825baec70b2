use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserRole;

/// The `oms_users` table. Staff identity only; authentication lives outside
/// this crate and hands services an explicit actor context.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "oms_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tailor::Entity")]
    Tailors,
}

impl Related<super::tailor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tailors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
