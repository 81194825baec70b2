use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Categorical overall grade of a quality inspection.
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
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverallQuality {
    #[sea_orm(string_value = "excellent")]
    Excellent,
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "satisfactory")]
    Satisfactory,
    #[sea_orm(string_value = "needs_improvement")]
    NeedsImprovement,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl OverallQuality {
    /// Numeric score used when folding grades into a tailor's running
    /// quality rating (excellent = 5 down to rejected = 1).
    pub fn score(self) -> i32 {
        match self {
            OverallQuality::Excellent => 5,
            OverallQuality::Good => 4,
            OverallQuality::Satisfactory => 3,
            OverallQuality::NeedsImprovement => 2,
            OverallQuality::Rejected => 1,
        }
    }
}
