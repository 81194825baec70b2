use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::customer::{
    self, ActiveModel as CustomerActiveModel, Entity as CustomerEntity, Model as CustomerModel,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::ids::IdGenerator;
use crate::services::contains_ci;
use crate::PaginatedResponse;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(length(min = 7, max = 20, message = "Phone must be 7 to 20 characters"))]
    pub phone: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    #[serde(default)]
    pub whatsapp_opt_in: bool,
    #[serde(default)]
    pub sms_opt_in: bool,
    #[serde(default)]
    pub email_opt_in: bool,
    pub notes: Option<String>,
}

/// Partial update; `customer_code` and creation metadata are immutable.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Phone must be 7 to 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub whatsapp_opt_in: Option<bool>,
    pub sms_opt_in: Option<bool>,
    pub email_opt_in: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub customer_code: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub whatsapp_opt_in: bool,
    pub sms_opt_in: bool,
    pub email_opt_in: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CustomerModel> for CustomerResponse {
    fn from(model: CustomerModel) -> Self {
        Self {
            id: model.id,
            customer_code: model.customer_code,
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            city: model.city,
            postal_code: model.postal_code,
            whatsapp_opt_in: model.whatsapp_opt_in,
            sms_opt_in: model.sms_opt_in,
            email_opt_in: model.email_opt_in,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for customer registration and lookup. Customers are never
/// deleted; there is deliberately no delete operation.
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
    ids: IdGenerator,
    event_sender: Option<Arc<EventSender>>,
}

impl CustomerService {
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

    /// Registers a new customer with a store-checked `CUST` code.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        request.validate()?;

        let customer_code = self.ids.customer_code().await?;
        let now = Utc::now();
        let customer_id = Uuid::new_v4();

        let active_model = CustomerActiveModel {
            id: Set(customer_id),
            customer_code: Set(customer_code.clone()),
            name: Set(request.name),
            phone: Set(request.phone),
            email: Set(request.email),
            address: Set(request.address),
            city: Set(request.city),
            postal_code: Set(request.postal_code),
            whatsapp_opt_in: Set(request.whatsapp_opt_in),
            sms_opt_in: Set(request.sms_opt_in),
            email_opt_in: Set(request.email_opt_in),
            notes: Set(request.notes),
            created_at: Set(now),
            updated_at: Set(None),
        };

        let model = active_model.insert(&*self.db_pool).await.map_err(|e| {
            error!(error = %e, customer_code, "Failed to create customer");
            ServiceError::DatabaseError(e)
        })?;

        info!(customer_id = %customer_id, customer_code, "Customer created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::CustomerCreated(customer_id)).await {
                warn!(error = %e, customer_id = %customer_id, "Failed to send customer created event");
            }
        }

        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: Uuid) -> Result<CustomerResponse, ServiceError> {
        let customer = CustomerEntity::find_by_id(customer_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;
        Ok(customer.into())
    }

    #[instrument(skip(self))]
    pub async fn get_customer_by_code(&self, code: &str) -> Result<CustomerResponse, ServiceError> {
        let customer = CustomerEntity::find()
            .filter(customer::Column::CustomerCode.eq(code))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;
        Ok(customer.into())
    }

    /// Updates mutable contact, address, and preference fields.
    #[instrument(skip(self, request))]
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        request.validate()?;

        let customer = CustomerEntity::find_by_id(customer_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;

        let mut active_model: CustomerActiveModel = customer.into();
        if let Some(name) = request.name {
            active_model.name = Set(name);
        }
        if let Some(phone) = request.phone {
            active_model.phone = Set(phone);
        }
        if let Some(email) = request.email {
            active_model.email = Set(Some(email));
        }
        if let Some(address) = request.address {
            active_model.address = Set(Some(address));
        }
        if let Some(city) = request.city {
            active_model.city = Set(Some(city));
        }
        if let Some(postal_code) = request.postal_code {
            active_model.postal_code = Set(Some(postal_code));
        }
        if let Some(flag) = request.whatsapp_opt_in {
            active_model.whatsapp_opt_in = Set(flag);
        }
        if let Some(flag) = request.sms_opt_in {
            active_model.sms_opt_in = Set(flag);
        }
        if let Some(flag) = request.email_opt_in {
            active_model.email_opt_in = Set(flag);
        }
        if let Some(notes) = request.notes {
            active_model.notes = Set(Some(notes));
        }
        active_model.updated_at = Set(Some(Utc::now()));

        let updated = active_model.update(&*self.db_pool).await?;

        info!(customer_id = %customer_id, "Customer updated");
        Ok(updated.into())
    }

    /// Case-insensitive substring search over name, phone, email, and
    /// customer code.
    #[instrument(skip(self))]
    pub async fn search_customers(
        &self,
        query: &str,
    ) -> Result<Vec<CustomerResponse>, ServiceError> {
        let condition = Condition::any()
            .add(contains_ci(customer::Column::Name, query))
            .add(contains_ci(customer::Column::Phone, query))
            .add(contains_ci(customer::Column::Email, query))
            .add(contains_ci(customer::Column::CustomerCode, query));

        let customers = CustomerEntity::find()
            .filter(condition)
            .order_by_asc(customer::Column::Name)
            .all(&*self.db_pool)
            .await?;

        Ok(customers.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedResponse<CustomerResponse>, ServiceError> {
        let paginator = CustomerEntity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .paginate(&*self.db_pool, per_page.clamp(1, 100));

        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(page.max(1) - 1).await?;

        Ok(PaginatedResponse {
            items: customers.into_iter().map(Into::into).collect(),
            total,
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        })
    }
}
