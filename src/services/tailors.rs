use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::tailor::{
    self, ActiveModel as TailorActiveModel, Entity as TailorEntity, Model as TailorModel,
};
use crate::entities::user::{ActiveModel as UserActiveModel, Entity as UserEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::ids::IdGenerator;
use crate::models::{SkillLevel, UserRole};

const DEFAULT_MAX_CONCURRENT_ORDERS: i32 = 5;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OnboardTailorRequest {
    /// Existing staff user to wrap; a new user row is created when absent
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Tailor name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub skill_level: SkillLevel,
    pub hourly_rate: Option<Decimal>,
    pub max_concurrent_orders: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TailorResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tailor_code: String,
    pub specializations: Vec<String>,
    pub skill_level: SkillLevel,
    pub hourly_rate: Option<Decimal>,
    pub is_available: bool,
    pub max_concurrent_orders: i32,
    pub current_order_count: i32,
    pub total_orders_completed: i32,
    pub quality_rating: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<TailorModel> for TailorResponse {
    fn from(model: TailorModel) -> Self {
        let specializations = serde_json::from_value(model.specializations).unwrap_or_default();
        Self {
            id: model.id,
            user_id: model.user_id,
            tailor_code: model.tailor_code,
            specializations,
            skill_level: model.skill_level,
            hourly_rate: model.hourly_rate,
            is_available: model.is_available,
            max_concurrent_orders: model.max_concurrent_orders,
            current_order_count: model.current_order_count,
            total_orders_completed: model.total_orders_completed,
            quality_rating: model.quality_rating,
            created_at: model.created_at,
        }
    }
}

/// Service for tailor onboarding and availability. Workload counters on
/// the tailor row are owned by the assignment and quality-check services.
#[derive(Clone)]
pub struct TailorService {
    db_pool: Arc<DbPool>,
    ids: IdGenerator,
    event_sender: Option<Arc<EventSender>>,
}

impl TailorService {
    pub fn new(
        db_pool: Arc<DbPool>,
        ids: IdGenerator,
        event_sender: Option<Arc<EventSender>>,
    ) -> Self {
        Self {
            db_pool,
            ids,
            event_sender,
        }
    }

    /// Onboards a tailor with a store-checked `TLR` code, creating the
    /// backing user row when none is supplied.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn onboard_tailor(
        &self,
        request: OnboardTailorRequest,
    ) -> Result<TailorResponse, ServiceError> {
        request.validate()?;

        if let Some(max) = request.max_concurrent_orders {
            if max < 1 {
                return Err(ServiceError::ValidationError(
                    "max_concurrent_orders must be at least 1".to_string(),
                ));
            }
        }

        let tailor_code = self.ids.tailor_code().await?;
        let now = Utc::now();
        let tailor_id = Uuid::new_v4();

        let txn = self.db_pool.begin().await?;

        let user_id = match request.user_id {
            Some(id) => {
                UserEntity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
                id
            }
            None => {
                let user_id = Uuid::new_v4();
                let user = UserActiveModel {
                    id: Set(user_id),
                    name: Set(request.name.clone()),
                    email: Set(request.email.clone()),
                    phone: Set(request.phone.clone()),
                    role: Set(UserRole::Tailor),
                    is_active: Set(true),
                    created_at: Set(now),
                };
                user.insert(&txn).await?;
                user_id
            }
        };

        let tailor = TailorActiveModel {
            id: Set(tailor_id),
            user_id: Set(user_id),
            tailor_code: Set(tailor_code.clone()),
            specializations: Set(serde_json::json!(request.specializations)),
            skill_level: Set(request.skill_level),
            hourly_rate: Set(request.hourly_rate),
            is_available: Set(true),
            max_concurrent_orders: Set(request
                .max_concurrent_orders
                .unwrap_or(DEFAULT_MAX_CONCURRENT_ORDERS)),
            current_order_count: Set(0),
            total_orders_completed: Set(0),
            quality_rating: Set(Decimal::ZERO),
            quality_checks_count: Set(0),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let model = tailor.insert(&txn).await?;
        txn.commit().await?;

        info!(tailor_id = %tailor_id, tailor_code, "Tailor onboarded");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::TailorOnboarded(tailor_id)).await {
                warn!(error = %e, tailor_id = %tailor_id, "Failed to send tailor onboarded event");
            }
        }

        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_tailor(&self, tailor_id: Uuid) -> Result<TailorResponse, ServiceError> {
        let tailor = TailorEntity::find_by_id(tailor_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;
        Ok(tailor.into())
    }

    #[instrument(skip(self))]
    pub async fn get_tailor_by_code(&self, code: &str) -> Result<TailorResponse, ServiceError> {
        let tailor = TailorEntity::find()
            .filter(tailor::Column::TailorCode.eq(code))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;
        Ok(tailor.into())
    }

    /// Available tailors ordered by fewest active orders first, so callers
    /// pick the least-loaded candidate. Capacity is enforced again at
    /// assignment time; this ordering is advisory.
    #[instrument(skip(self))]
    pub async fn get_available_tailors(&self) -> Result<Vec<TailorResponse>, ServiceError> {
        let tailors = TailorEntity::find()
            .filter(tailor::Column::IsAvailable.eq(true))
            .order_by_asc(tailor::Column::CurrentOrderCount)
            .all(&*self.db_pool)
            .await?;
        Ok(tailors.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        tailor_id: Uuid,
        available: bool,
    ) -> Result<TailorResponse, ServiceError> {
        let tailor = TailorEntity::find_by_id(tailor_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;

        let mut active_model: TailorActiveModel = tailor.into();
        active_model.is_available = Set(available);
        active_model.updated_at = Set(Some(Utc::now()));
        let updated = active_model.update(&*self.db_pool).await?;

        info!(tailor_id = %tailor_id, available, "Tailor availability updated");
        Ok(updated.into())
    }
}
