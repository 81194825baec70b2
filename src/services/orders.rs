use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::delivery;
use crate::entities::customer::Entity as CustomerEntity;
use crate::entities::order::{
    self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
};
use crate::entities::order_status_history::{
    self, ActiveModel as HistoryActiveModel, Entity as HistoryEntity, Model as HistoryModel,
};
use crate::entities::store::Entity as StoreEntity;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::ids::IdGenerator;
use crate::models::{OrderPriority, OrderStatus, OrderType, WorkflowStage};
use crate::services::{contains_ci, Actor};
use crate::workflow::{OrderState, WorkflowEvent};
use crate::PaginatedResponse;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub store_id: Uuid,
    pub order_type: OrderType,
    #[serde(default)]
    pub priority: OrderPriority,
    #[validate(length(min = 1, message = "Garment type is required"))]
    pub garment_type: String,
    pub fabric_details: Option<String>,
    pub special_instructions: Option<String>,
    pub measurement_id: Option<Uuid>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub advance_paid: Decimal,
    /// Caller override; computed from type and priority when absent
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub fitting_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    pub notes: Option<String>,
    /// Optimistic-concurrency guard: when set, the update is rejected if
    /// the stored row has moved past this version.
    pub expected_version: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
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
    pub measurement_id: Option<Uuid>,
    pub total_amount: Decimal,
    pub advance_paid: Decimal,
    pub balance_amount: Decimal,
    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: DateTime<Utc>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub fitting_date: Option<DateTime<Utc>>,
    pub assigned_tailor_id: Option<Uuid>,
    pub stitching_started_at: Option<DateTime<Utc>>,
    pub stitching_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

impl From<OrderModel> for OrderResponse {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            order_number: model.order_number,
            customer_id: model.customer_id,
            store_id: model.store_id,
            order_type: model.order_type,
            status: model.status,
            priority: model.priority,
            workflow_stage: model.workflow_stage,
            garment_type: model.garment_type,
            fabric_details: model.fabric_details,
            special_instructions: model.special_instructions,
            measurement_id: model.measurement_id,
            total_amount: model.total_amount,
            advance_paid: model.advance_paid,
            balance_amount: model.balance_amount,
            order_date: model.order_date,
            expected_delivery_date: model.expected_delivery_date,
            actual_delivery_date: model.actual_delivery_date,
            fitting_date: model.fitting_date,
            assigned_tailor_id: model.assigned_tailor_id,
            stitching_started_at: model.stitching_started_at,
            stitching_completed_at: model.stitching_completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
            version: model.version,
        }
    }
}

/// Applies one workflow event to an order row and persists the outcome.
///
/// Single owner of the status/stage pair: bumps the version, stamps
/// `actual_delivery_date` exactly when the new status is `delivered`, and
/// appends a status-history row whenever the customer-facing status
/// changed. Runs on the caller's transaction; `extra` may set additional
/// columns (assignment pointers, stitching timestamps) in the same write.
pub(crate) async fn apply_order_transition<C>(
    conn: &C,
    model: OrderModel,
    event: WorkflowEvent,
    actor: &Actor,
    note: Option<String>,
    extra: impl FnOnce(&mut OrderActiveModel),
) -> Result<(OrderModel, OrderStatus), ServiceError>
where
    C: ConnectionTrait,
{
    let old_status = model.status;
    let state = OrderState::of(model.status, model.workflow_stage);
    let new_state = state.apply(event)?;
    let now = Utc::now();

    let order_id = model.id;
    let version = model.version;
    let deliver_now = new_state.status == OrderStatus::Delivered
        && model.actual_delivery_date.is_none();

    let mut active_model: OrderActiveModel = model.into();
    active_model.status = Set(new_state.status);
    active_model.workflow_stage = Set(new_state.stage);
    active_model.updated_at = Set(Some(now));
    active_model.version = Set(version + 1);
    if deliver_now {
        active_model.actual_delivery_date = Set(Some(now));
    }
    extra(&mut active_model);

    let updated = active_model.update(conn).await?;

    if new_state.status != old_status {
        let history = HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            status: Set(new_state.status),
            notes: Set(note),
            updated_by: Set(Some(actor.user_id)),
            updated_by_name: Set(Some(actor.display_name.clone())),
            created_at: Set(now),
        };
        history.insert(conn).await?;
    }

    Ok((updated, old_status))
}

/// Service for order creation, lookup, and customer-facing status changes.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    ids: IdGenerator,
    event_sender: Option<Arc<EventSender>>,
}

impl OrderService {
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

    /// Creates an order in `pending` with its initial history entry. The
    /// balance is derived from total and advance; the expected delivery
    /// date defaults to the type/priority estimate.
    #[instrument(skip(self, request, actor), fields(customer_id = %request.customer_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
        actor: &Actor,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;

        if request.total_amount < Decimal::ZERO || request.advance_paid < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Amounts must not be negative".to_string(),
            ));
        }
        if request.advance_paid > request.total_amount {
            return Err(ServiceError::ValidationError(
                "Advance cannot exceed the order total".to_string(),
            ));
        }

        let customer = CustomerEntity::find_by_id(request.customer_id)
            .one(&*self.db_pool)
            .await?;
        if customer.is_none() {
            return Err(ServiceError::NotFound("Customer not found".to_string()));
        }
        let store = StoreEntity::find_by_id(request.store_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Store not found".to_string()))?;

        let order_number = self.ids.order_number(&store.code).await?;
        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let expected = request
            .expected_delivery_date
            .unwrap_or_else(|| {
                delivery::calculate_delivery_date(request.order_type, request.priority, now)
            });
        let balance = request.total_amount - request.advance_paid;
        let has_advance = request.advance_paid > Decimal::ZERO;

        let txn = self.db_pool.begin().await?;

        let order_active_model = OrderActiveModel {
            id: Set(order_id),
            order_number: Set(order_number.clone()),
            customer_id: Set(request.customer_id),
            store_id: Set(request.store_id),
            order_type: Set(request.order_type),
            status: Set(OrderStatus::Pending),
            priority: Set(request.priority),
            workflow_stage: Set(None),
            garment_type: Set(request.garment_type),
            fabric_details: Set(request.fabric_details),
            special_instructions: Set(request.special_instructions),
            measurement_id: Set(request.measurement_id),
            total_amount: Set(request.total_amount),
            advance_paid: Set(request.advance_paid),
            balance_amount: Set(balance),
            order_date: Set(now),
            expected_delivery_date: Set(expected),
            actual_delivery_date: Set(None),
            fitting_date: Set(request.fitting_date),
            advance_paid_at: Set(has_advance.then_some(now)),
            balance_settled_at: Set((has_advance && balance == Decimal::ZERO).then_some(now)),
            assigned_tailor_id: Set(None),
            stitching_started_at: Set(None),
            stitching_completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        };

        let order_model = order_active_model.insert(&txn).await.map_err(|e| {
            error!(error = %e, order_number, "Failed to create order");
            ServiceError::DatabaseError(e)
        })?;

        let history = HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            status: Set(OrderStatus::Pending),
            notes: Set(Some("Order created".to_string())),
            updated_by: Set(Some(actor.user_id)),
            updated_by_name: Set(Some(actor.display_name.clone())),
            created_at: Set(now),
        };
        history.insert(&txn).await?;

        txn.commit().await?;

        info!(order_id = %order_id, order_number, "Order created");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderCreated(order_id)).await {
                warn!(error = %e, order_id = %order_id, "Failed to send order created event");
            }
        }

        Ok(order_model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderResponse, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;
        Ok(order.into())
    }

    #[instrument(skip(self))]
    pub async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderResponse, ServiceError> {
        let order = OrderEntity::find()
            .filter(order::Column::OrderNumber.eq(order_number))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;
        Ok(order.into())
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedResponse<OrderResponse>, ServiceError> {
        let paginator = OrderEntity::find()
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&*self.db_pool, per_page.clamp(1, 100));

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.max(1) - 1).await?;

        Ok(PaginatedResponse {
            items: orders.into_iter().map(Into::into).collect(),
            total,
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        })
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = OrderEntity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_desc(order::Column::OrderDate)
            .all(&*self.db_pool)
            .await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Substring search on order number and garment type.
    #[instrument(skip(self))]
    pub async fn search_orders(&self, query: &str) -> Result<Vec<OrderResponse>, ServiceError> {
        let condition = Condition::any()
            .add(contains_ci(order::Column::OrderNumber, query))
            .add(contains_ci(order::Column::GarmentType, query));

        let orders = OrderEntity::find()
            .filter(condition)
            .order_by_desc(order::Column::OrderDate)
            .all(&*self.db_pool)
            .await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Caller-driven status change, validated against the workflow chain.
    /// Appends the history row and stamps the delivery date in the same
    /// transaction as the order update.
    #[instrument(skip(self, request, actor), fields(order_id = %order_id, new_status = %request.status))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        request: UpdateOrderStatusRequest,
        actor: &Actor,
    ) -> Result<OrderResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!(order_id = %order_id, "Order not found for status update");
                ServiceError::NotFound("Order not found".to_string())
            })?;

        if let Some(expected) = request.expected_version {
            if order.version != expected {
                return Err(ServiceError::ConcurrentModification(order_id));
            }
        }

        let target = request.status;
        let (updated, old_status) = apply_order_transition(
            &txn,
            order,
            WorkflowEvent::SetStatus(target),
            actor,
            request.notes,
            |_| {},
        )
        .await?;

        txn.commit().await?;

        info!(order_id = %order_id, old_status = %old_status, new_status = %target, "Order status updated");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::OrderStatusChanged {
                    order_id,
                    old_status,
                    new_status: target,
                })
                .await
            {
                warn!(error = %e, order_id = %order_id, "Failed to send status changed event");
            }
        }

        Ok(updated.into())
    }

    /// Cancels an order from any non-terminal status.
    #[instrument(skip(self, actor), fields(order_id = %order_id))]
    pub async fn cancel_order(
        &self,
        order_id: Uuid,
        reason: Option<String>,
        actor: &Actor,
    ) -> Result<OrderResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let (updated, old_status) =
            apply_order_transition(&txn, order, WorkflowEvent::Cancel, actor, reason, |_| {})
                .await?;

        txn.commit().await?;

        info!(order_id = %order_id, old_status = %old_status, "Order cancelled");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderCancelled(order_id)).await {
                warn!(error = %e, order_id = %order_id, "Failed to send order cancelled event");
            }
        }

        Ok(updated.into())
    }

    /// Explicit completion of an approved order: stage `completed`, status
    /// `delivered`, delivery date stamped.
    #[instrument(skip(self, actor), fields(order_id = %order_id))]
    pub async fn complete_order(
        &self,
        order_id: Uuid,
        actor: &Actor,
    ) -> Result<OrderResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let (updated, _) = apply_order_transition(
            &txn,
            order,
            WorkflowEvent::Complete,
            actor,
            Some("Order delivered".to_string()),
            |_| {},
        )
        .await?;

        txn.commit().await?;

        info!(order_id = %order_id, "Order completed and delivered");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderDelivered(order_id)).await {
                warn!(error = %e, order_id = %order_id, "Failed to send order delivered event");
            }
        }

        Ok(updated.into())
    }

    /// Records a payment against the order. The stored balance is always
    /// recomputed as total minus advance; overpayment is rejected.
    #[instrument(skip(self), fields(order_id = %order_id, amount = %amount))]
    pub async fn record_payment(
        &self,
        order_id: Uuid,
        amount: Decimal,
    ) -> Result<OrderResponse, ServiceError> {
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Payment amount must be positive".to_string(),
            ));
        }

        let order = OrderEntity::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let new_advance = order.advance_paid + amount;
        if new_advance > order.total_amount {
            return Err(ServiceError::ValidationError(format!(
                "Payment of {amount} would exceed the order total {}",
                order.total_amount
            )));
        }
        let new_balance = order.total_amount - new_advance;
        let now = Utc::now();
        let version = order.version;
        let first_payment = order.advance_paid_at.is_none();

        let mut active_model: OrderActiveModel = order.into();
        active_model.advance_paid = Set(new_advance);
        active_model.balance_amount = Set(new_balance);
        if first_payment {
            active_model.advance_paid_at = Set(Some(now));
        }
        if new_balance == Decimal::ZERO {
            active_model.balance_settled_at = Set(Some(now));
        }
        active_model.updated_at = Set(Some(now));
        active_model.version = Set(version + 1);

        let updated = active_model.update(&*self.db_pool).await?;

        info!(order_id = %order_id, new_balance = %new_balance, "Payment recorded");
        Ok(updated.into())
    }

    /// Ordered audit trail of customer-facing status changes.
    #[instrument(skip(self))]
    pub async fn status_history(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<HistoryModel>, ServiceError> {
        let history = HistoryEntity::find()
            .filter(order_status_history::Column::OrderId.eq(order_id))
            .order_by_asc(order_status_history::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(history)
    }
}
