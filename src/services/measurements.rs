use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::customer::Entity as CustomerEntity;
use crate::entities::customer_measurement::{
    self, ActiveModel as MeasurementActiveModel, Entity as MeasurementEntity,
    Model as MeasurementModel,
};
use crate::errors::ServiceError;
use crate::models::MeasurementUnit;

/// Full measurement record: 15 upper-garment and 6 lower-garment fields,
/// all optional. The same shape is used for recording and for explicit
/// full-record updates.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MeasurementsInput {
    #[serde(default)]
    pub unit: MeasurementUnit,

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

    pub trouser_waist: Option<Decimal>,
    pub trouser_length: Option<Decimal>,
    pub inseam: Option<Decimal>,
    pub thigh: Option<Decimal>,
    pub knee: Option<Decimal>,
    pub ankle: Option<Decimal>,

    pub notes: Option<String>,
}

impl MeasurementsInput {
    fn all_values(&self) -> [Option<Decimal>; 21] {
        [
            self.neck,
            self.chest,
            self.waist,
            self.hip,
            self.shoulder_width,
            self.sleeve_length,
            self.bicep,
            self.wrist,
            self.armhole,
            self.shirt_length,
            self.front_neck_depth,
            self.back_neck_depth,
            self.yoke,
            self.cuff,
            self.collar,
            self.trouser_waist,
            self.trouser_length,
            self.inseam,
            self.thigh,
            self.knee,
            self.ankle,
        ]
    }

    fn validate_values(&self) -> Result<(), ServiceError> {
        let has_any = self.all_values().iter().any(Option::is_some);
        if !has_any {
            return Err(ServiceError::ValidationError(
                "At least one measurement value is required".to_string(),
            ));
        }
        if self
            .all_values()
            .iter()
            .flatten()
            .any(|v| *v <= Decimal::ZERO)
        {
            return Err(ServiceError::ValidationError(
                "Measurement values must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub type MeasurementResponse = MeasurementModel;

/// Service for customer measurement snapshots. Records are immutable except
/// via explicit update; a customer accumulates a history ordered by
/// creation time.
#[derive(Clone)]
pub struct MeasurementService {
    db_pool: Arc<DbPool>,
}

impl MeasurementService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn record_measurements(
        &self,
        customer_id: Uuid,
        input: MeasurementsInput,
        recorded_by: Option<Uuid>,
    ) -> Result<MeasurementResponse, ServiceError> {
        input.validate_values()?;

        let customer = CustomerEntity::find_by_id(customer_id)
            .one(&*self.db_pool)
            .await?;
        if customer.is_none() {
            return Err(ServiceError::NotFound("Customer not found".to_string()));
        }

        let measurement_id = Uuid::new_v4();
        let active_model = Self::to_active_model(measurement_id, customer_id, &input, recorded_by);

        let model = active_model.insert(&*self.db_pool).await?;
        info!(measurement_id = %measurement_id, customer_id = %customer_id, "Measurements recorded");
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_measurements(
        &self,
        measurement_id: Uuid,
    ) -> Result<MeasurementResponse, ServiceError> {
        MeasurementEntity::find_by_id(measurement_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Measurements not found".to_string()))
    }

    /// Latest record for a customer, if any has been taken.
    #[instrument(skip(self))]
    pub async fn latest_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<MeasurementResponse>, ServiceError> {
        let latest = MeasurementEntity::find()
            .filter(customer_measurement::Column::CustomerId.eq(customer_id))
            .order_by_desc(customer_measurement::Column::CreatedAt)
            .one(&*self.db_pool)
            .await?;
        Ok(latest)
    }

    /// Full measurement history, newest first.
    #[instrument(skip(self))]
    pub async fn history_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<MeasurementResponse>, ServiceError> {
        let history = MeasurementEntity::find()
            .filter(customer_measurement::Column::CustomerId.eq(customer_id))
            .order_by_desc(customer_measurement::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(history)
    }

    /// Explicit full-record update: replaces every measurement field, the
    /// unit, and the notes with the provided input.
    #[instrument(skip(self, input))]
    pub async fn update_measurements(
        &self,
        measurement_id: Uuid,
        input: MeasurementsInput,
    ) -> Result<MeasurementResponse, ServiceError> {
        input.validate_values()?;

        let existing = MeasurementEntity::find_by_id(measurement_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Measurements not found".to_string()))?;

        let mut active_model =
            Self::to_active_model(existing.id, existing.customer_id, &input, existing.recorded_by);
        active_model.created_at = Set(existing.created_at);
        active_model.updated_at = Set(Some(Utc::now()));

        let updated = active_model.update(&*self.db_pool).await?;
        info!(measurement_id = %measurement_id, "Measurements updated");
        Ok(updated)
    }

    fn to_active_model(
        id: Uuid,
        customer_id: Uuid,
        input: &MeasurementsInput,
        recorded_by: Option<Uuid>,
    ) -> MeasurementActiveModel {
        MeasurementActiveModel {
            id: Set(id),
            customer_id: Set(customer_id),
            unit: Set(input.unit),
            neck: Set(input.neck),
            chest: Set(input.chest),
            waist: Set(input.waist),
            hip: Set(input.hip),
            shoulder_width: Set(input.shoulder_width),
            sleeve_length: Set(input.sleeve_length),
            bicep: Set(input.bicep),
            wrist: Set(input.wrist),
            armhole: Set(input.armhole),
            shirt_length: Set(input.shirt_length),
            front_neck_depth: Set(input.front_neck_depth),
            back_neck_depth: Set(input.back_neck_depth),
            yoke: Set(input.yoke),
            cuff: Set(input.cuff),
            collar: Set(input.collar),
            trouser_waist: Set(input.trouser_waist),
            trouser_length: Set(input.trouser_length),
            inseam: Set(input.inseam),
            thigh: Set(input.thigh),
            knee: Set(input.knee),
            ankle: Set(input.ankle),
            notes: Set(input.notes.clone()),
            recorded_by: Set(recorded_by),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_input_is_rejected() {
        let input = MeasurementsInput::default();
        assert!(input.validate_values().is_err());
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let input = MeasurementsInput {
            chest: Some(dec!(0)),
            ..Default::default()
        };
        assert!(input.validate_values().is_err());

        let input = MeasurementsInput {
            chest: Some(dec!(-40)),
            ..Default::default()
        };
        assert!(input.validate_values().is_err());
    }

    #[test]
    fn single_positive_value_is_enough() {
        let input = MeasurementsInput {
            chest: Some(dec!(40.5)),
            ..Default::default()
        };
        assert!(input.validate_values().is_ok());
    }
}
