use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::store::{
    self, ActiveModel as StoreActiveModel, Entity as StoreEntity, Model as StoreModel,
};
use crate::errors::ServiceError;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateStoreRequest {
    /// Short branch code embedded in order numbers, e.g. "KCH"
    #[validate(length(min = 2, max = 5, message = "Store code must be 2 to 5 characters"))]
    pub code: String,
    #[validate(length(min = 1, message = "Store name is required"))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StoreModel> for StoreResponse {
    fn from(model: StoreModel) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            address: model.address,
            phone: model.phone,
            manager_id: model.manager_id,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// Service for branch reference data.
#[derive(Clone)]
pub struct StoreService {
    db_pool: Arc<DbPool>,
}

impl StoreService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create_store(
        &self,
        request: CreateStoreRequest,
    ) -> Result<StoreResponse, ServiceError> {
        request.validate()?;

        if !request.code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ServiceError::ValidationError(
                "Store code must be alphabetic".to_string(),
            ));
        }

        let code = request.code.to_uppercase();
        let existing = StoreEntity::find()
            .filter(store::Column::Code.eq(&code))
            .one(&*self.db_pool)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::InvalidOperation(format!(
                "Store code {code} already exists"
            )));
        }

        let store_id = Uuid::new_v4();
        let active_model = StoreActiveModel {
            id: Set(store_id),
            code: Set(code.clone()),
            name: Set(request.name),
            address: Set(request.address),
            phone: Set(request.phone),
            manager_id: Set(request.manager_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&*self.db_pool).await?;
        info!(store_id = %store_id, code, "Store created");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_store(&self, store_id: Uuid) -> Result<StoreResponse, ServiceError> {
        let store = StoreEntity::find_by_id(store_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Store not found".to_string()))?;
        Ok(store.into())
    }

    #[instrument(skip(self))]
    pub async fn get_store_by_code(&self, code: &str) -> Result<StoreResponse, ServiceError> {
        let store = StoreEntity::find()
            .filter(store::Column::Code.eq(code.to_uppercase()))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Store not found".to_string()))?;
        Ok(store.into())
    }

    #[instrument(skip(self))]
    pub async fn list_active_stores(&self) -> Result<Vec<StoreResponse>, ServiceError> {
        let stores = StoreEntity::find()
            .filter(store::Column::IsActive.eq(true))
            .order_by_asc(store::Column::Code)
            .all(&*self.db_pool)
            .await?;
        Ok(stores.into_iter().map(Into::into).collect())
    }

    /// Deactivates a store; order history keeps referencing it.
    #[instrument(skip(self))]
    pub async fn deactivate_store(&self, store_id: Uuid) -> Result<StoreResponse, ServiceError> {
        let store = StoreEntity::find_by_id(store_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Store not found".to_string()))?;

        let mut active_model: StoreActiveModel = store.into();
        active_model.is_active = Set(false);
        let updated = active_model.update(&*self.db_pool).await?;
        info!(store_id = %store_id, "Store deactivated");
        Ok(updated.into())
    }
}
