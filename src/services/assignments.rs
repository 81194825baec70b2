use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::order::Entity as OrderEntity;
use crate::entities::order_assignment::{
    self, ActiveModel as AssignmentActiveModel, Entity as AssignmentEntity,
    Model as AssignmentModel,
};
use crate::entities::tailor::{ActiveModel as TailorActiveModel, Entity as TailorEntity};
use crate::entities::tailor_performance::{
    self, ActiveModel as PerformanceActiveModel, Entity as PerformanceEntity,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::AssignmentStatus;
use crate::services::orders::apply_order_transition;
use crate::services::Actor;
use crate::workflow::WorkflowEvent;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AssignOrderRequest {
    pub order_id: Uuid,
    pub tailor_id: Uuid,
    #[validate(length(max = 100, message = "Estimate must be at most 100 characters"))]
    pub estimated_completion_time: Option<String>,
    pub notes: Option<String>,
}

pub type AssignmentResponse = AssignmentModel;

/// Aggregate deltas folded into a tailor's monthly performance row.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PerformanceDelta {
    pub orders_completed: i32,
    pub checks_passed: i32,
    pub checks_failed: i32,
    /// Quality grade (1-5) to fold into the period average, if any
    pub rating: Option<i32>,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Upserts the `oms_tailor_performance` row for the current month.
pub(crate) async fn upsert_monthly_performance<C>(
    conn: &C,
    tailor_id: Uuid,
    delta: PerformanceDelta,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let period = month_start(now.date_naive());

    let existing = PerformanceEntity::find()
        .filter(tailor_performance::Column::TailorId.eq(tailor_id))
        .filter(tailor_performance::Column::Period.eq(period))
        .one(conn)
        .await?;

    match existing {
        Some(row) => {
            let rated_before = row.checks_passed + row.checks_failed;
            let new_average = match delta.rating {
                Some(score) => {
                    let folded = row.average_rating * Decimal::from(rated_before)
                        + Decimal::from(score);
                    (folded / Decimal::from(rated_before + 1)).round_dp(2)
                }
                None => row.average_rating,
            };

            let mut active_model: PerformanceActiveModel = row.clone().into();
            active_model.orders_completed = Set(row.orders_completed + delta.orders_completed);
            active_model.checks_passed = Set(row.checks_passed + delta.checks_passed);
            active_model.checks_failed = Set(row.checks_failed + delta.checks_failed);
            active_model.average_rating = Set(new_average);
            active_model.updated_at = Set(now);
            active_model.update(conn).await?;
        }
        None => {
            let row = PerformanceActiveModel {
                id: Set(Uuid::new_v4()),
                tailor_id: Set(tailor_id),
                period: Set(period),
                orders_completed: Set(delta.orders_completed),
                checks_passed: Set(delta.checks_passed),
                checks_failed: Set(delta.checks_failed),
                average_rating: Set(delta
                    .rating
                    .map(Decimal::from)
                    .unwrap_or(Decimal::ZERO)),
                updated_at: Set(now),
            };
            row.insert(conn).await?;
        }
    }

    Ok(())
}

/// Service for the assignment lifecycle: assigned → in_progress →
/// completed. Each operation mutates the assignment, the order's workflow
/// state, and the tailor's workload counters in one transaction.
#[derive(Clone)]
pub struct AssignmentService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl AssignmentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Assigns an order to a tailor. Capacity is enforced here, not just
    /// through the advisory ordering of `get_available_tailors`: a tailor
    /// at `max_concurrent_orders` rejects the assignment.
    #[instrument(skip(self, request, actor), fields(order_id = %request.order_id, tailor_id = %request.tailor_id))]
    pub async fn assign_order(
        &self,
        request: AssignOrderRequest,
        actor: &Actor,
    ) -> Result<AssignmentResponse, ServiceError> {
        request.validate()?;

        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(request.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;
        let tailor = TailorEntity::find_by_id(request.tailor_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;

        if !tailor.is_available {
            return Err(ServiceError::InvalidOperation(format!(
                "Tailor {} is not available",
                tailor.tailor_code
            )));
        }
        if tailor.current_order_count >= tailor.max_concurrent_orders {
            return Err(ServiceError::CapacityExceeded(format!(
                "Tailor {} already has {} active orders",
                tailor.tailor_code, tailor.current_order_count
            )));
        }

        let now = Utc::now();
        let assignment_id = Uuid::new_v4();
        let assignment = AssignmentActiveModel {
            id: Set(assignment_id),
            order_id: Set(request.order_id),
            tailor_id: Set(request.tailor_id),
            status: Set(AssignmentStatus::Assigned),
            assigned_by: Set(actor.user_id),
            assigned_at: Set(now),
            started_at: Set(None),
            completed_at: Set(None),
            estimated_completion_time: Set(request.estimated_completion_time),
            notes: Set(request.notes),
        };
        let assignment_model = assignment.insert(&txn).await?;

        let tailor_id = request.tailor_id;
        let note = format!("Assigned to tailor {}", tailor.tailor_code);
        apply_order_transition(&txn, order, WorkflowEvent::Assign, actor, Some(note), |am| {
            am.assigned_tailor_id = Set(Some(tailor_id));
        })
        .await?;

        let current = tailor.current_order_count;
        let mut tailor_active: TailorActiveModel = tailor.into();
        tailor_active.current_order_count = Set(current + 1);
        tailor_active.updated_at = Set(Some(now));
        tailor_active.update(&txn).await?;

        txn.commit().await?;

        info!(assignment_id = %assignment_id, order_id = %request.order_id, "Order assigned");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::OrderAssigned {
                    order_id: request.order_id,
                    tailor_id,
                })
                .await
            {
                warn!(error = %e, order_id = %request.order_id, "Failed to send order assigned event");
            }
        }

        Ok(assignment_model)
    }

    /// Marks stitching as started: assignment in_progress, order stage
    /// in_progress, start timestamp stamped on both.
    #[instrument(skip(self, actor), fields(assignment_id = %assignment_id))]
    pub async fn start_assignment(
        &self,
        assignment_id: Uuid,
        actor: &Actor,
    ) -> Result<AssignmentResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let assignment = AssignmentEntity::find_by_id(assignment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Assignment not found".to_string()))?;

        if assignment.status != AssignmentStatus::Assigned {
            return Err(ServiceError::InvalidOperation(format!(
                "Assignment is {}, expected assigned",
                assignment.status
            )));
        }

        let order = OrderEntity::find_by_id(assignment.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let now = Utc::now();
        let order_id = assignment.order_id;

        let mut assignment_active: AssignmentActiveModel = assignment.into();
        assignment_active.status = Set(AssignmentStatus::InProgress);
        assignment_active.started_at = Set(Some(now));
        let updated_assignment = assignment_active.update(&txn).await?;

        apply_order_transition(&txn, order, WorkflowEvent::StartStitching, actor, None, |am| {
            am.stitching_started_at = Set(Some(now));
        })
        .await?;

        txn.commit().await?;

        info!(assignment_id = %assignment_id, order_id = %order_id, "Stitching started");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::StitchingStarted(order_id)).await {
                warn!(error = %e, order_id = %order_id, "Failed to send stitching started event");
            }
        }

        Ok(updated_assignment)
    }

    /// Completes the assignment: terminal for the assignment row, order
    /// moves to stitching_complete/ready, tailor counters and the monthly
    /// performance aggregate are updated.
    #[instrument(skip(self, actor), fields(assignment_id = %assignment_id))]
    pub async fn complete_assignment(
        &self,
        assignment_id: Uuid,
        actor: &Actor,
    ) -> Result<AssignmentResponse, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let assignment = AssignmentEntity::find_by_id(assignment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Assignment not found".to_string()))?;

        if assignment.status == AssignmentStatus::Completed {
            return Err(ServiceError::InvalidOperation(
                "Assignment is already completed".to_string(),
            ));
        }

        let order = OrderEntity::find_by_id(assignment.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;
        let tailor = TailorEntity::find_by_id(assignment.tailor_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;

        let now = Utc::now();
        let order_id = assignment.order_id;
        let tailor_id = assignment.tailor_id;

        let mut assignment_active: AssignmentActiveModel = assignment.into();
        assignment_active.status = Set(AssignmentStatus::Completed);
        assignment_active.completed_at = Set(Some(now));
        let updated_assignment = assignment_active.update(&txn).await?;

        apply_order_transition(
            &txn,
            order,
            WorkflowEvent::CompleteStitching,
            actor,
            Some("Stitching completed".to_string()),
            |am| {
                am.stitching_completed_at = Set(Some(now));
            },
        )
        .await?;

        let current = tailor.current_order_count;
        let completed = tailor.total_orders_completed;
        let mut tailor_active: TailorActiveModel = tailor.into();
        tailor_active.current_order_count = Set((current - 1).max(0));
        tailor_active.total_orders_completed = Set(completed + 1);
        tailor_active.updated_at = Set(Some(now));
        tailor_active.update(&txn).await?;

        upsert_monthly_performance(
            &txn,
            tailor_id,
            PerformanceDelta {
                orders_completed: 1,
                ..Default::default()
            },
        )
        .await?;

        txn.commit().await?;

        info!(assignment_id = %assignment_id, order_id = %order_id, "Assignment completed");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::StitchingCompleted(order_id)).await {
                warn!(error = %e, order_id = %order_id, "Failed to send stitching completed event");
            }
        }

        Ok(updated_assignment)
    }

    #[instrument(skip(self))]
    pub async fn get_assignment(
        &self,
        assignment_id: Uuid,
    ) -> Result<AssignmentResponse, ServiceError> {
        AssignmentEntity::find_by_id(assignment_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Assignment not found".to_string()))
    }

    /// Assignment history for an order, newest first. The latest row is
    /// the active one unless it is completed.
    #[instrument(skip(self))]
    pub async fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<AssignmentResponse>, ServiceError> {
        let assignments = AssignmentEntity::find()
            .filter(order_assignment::Column::OrderId.eq(order_id))
            .order_by_desc(order_assignment::Column::AssignedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(assignments)
    }

    /// Open workload for a tailor: everything not yet completed.
    #[instrument(skip(self))]
    pub async fn active_for_tailor(
        &self,
        tailor_id: Uuid,
    ) -> Result<Vec<AssignmentResponse>, ServiceError> {
        let assignments = AssignmentEntity::find()
            .filter(order_assignment::Column::TailorId.eq(tailor_id))
            .filter(order_assignment::Column::Status.ne(AssignmentStatus::Completed))
            .order_by_asc(order_assignment::Column::AssignedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_start_clamps_to_first() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
