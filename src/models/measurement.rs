use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MeasurementUnit {
    #[sea_orm(string_value = "cm")]
    Cm,
    #[sea_orm(string_value = "inches")]
    Inches,
}

impl Default for MeasurementUnit {
    fn default() -> Self {
        MeasurementUnit::Cm
    }
}
