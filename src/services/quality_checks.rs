use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::order::Entity as OrderEntity;
use crate::entities::order_assignment::{self, Entity as AssignmentEntity};
use crate::entities::quality_check::{
    self, ActiveModel as QualityCheckActiveModel, Entity as QualityCheckEntity,
    Model as QualityCheckModel,
};
use crate::entities::tailor::{ActiveModel as TailorActiveModel, Entity as TailorEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::OverallQuality;
use crate::services::assignments::{upsert_monthly_performance, PerformanceDelta};
use crate::services::orders::apply_order_transition;
use crate::services::Actor;
use crate::workflow::WorkflowEvent;

/// Minimum 1-5 rating on the stitching and finishing axes for a check to
/// pass.
pub const PASS_THRESHOLD: i32 = 3;

/// Pass rule: a categorical exclusion and two numeric floors. A check
/// passes only when the overall grade is not `rejected` AND both stitching
/// and finishing rate at least [`PASS_THRESHOLD`].
pub fn evaluate(overall: OverallQuality, stitching_quality: i32, finishing_quality: i32) -> bool {
    overall != OverallQuality::Rejected
        && stitching_quality >= PASS_THRESHOLD
        && finishing_quality >= PASS_THRESHOLD
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QualityCheckRequest {
    pub order_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Ratings are 1 to 5"))]
    pub stitching_quality: i32,
    #[validate(range(min = 1, max = 5, message = "Ratings are 1 to 5"))]
    pub finishing_quality: i32,
    #[validate(range(min = 1, max = 5, message = "Ratings are 1 to 5"))]
    pub measurement_accuracy: i32,
    #[validate(range(min = 1, max = 5, message = "Ratings are 1 to 5"))]
    pub design_adherence: i32,
    pub overall_quality: OverallQuality,
    #[serde(default)]
    pub defects: Vec<String>,
    pub corrective_actions: Option<String>,
    pub notes: Option<String>,
}

pub type QualityCheckResponse = QualityCheckModel;

/// Service recording inspections and driving the approval / rework loop.
/// Check rows are immutable; re-inspections append new rows.
#[derive(Clone)]
pub struct QualityCheckService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl QualityCheckService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records an inspection and moves the order forward (approved) or
    /// back into rework (quality_check), in one transaction. The assigned
    /// tailor's running quality rating absorbs the overall grade.
    #[instrument(skip(self, request, actor), fields(order_id = %request.order_id, overall = %request.overall_quality))]
    pub async fn perform_quality_check(
        &self,
        request: QualityCheckRequest,
        actor: &Actor,
    ) -> Result<QualityCheckResponse, ServiceError> {
        request.validate()?;

        let passed = evaluate(
            request.overall_quality,
            request.stitching_quality,
            request.finishing_quality,
        );

        let txn = self.db_pool.begin().await?;

        let order = OrderEntity::find_by_id(request.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        // Latest assignment links the check to the tailor who did the work.
        let assignment = AssignmentEntity::find()
            .filter(order_assignment::Column::OrderId.eq(request.order_id))
            .order_by_desc(order_assignment::Column::AssignedAt)
            .one(&txn)
            .await?;

        let now = Utc::now();
        let check_id = Uuid::new_v4();
        let order_id = request.order_id;

        let check = QualityCheckActiveModel {
            id: Set(check_id),
            order_id: Set(order_id),
            assignment_id: Set(assignment.as_ref().map(|a| a.id)),
            checked_by: Set(actor.user_id),
            stitching_quality: Set(request.stitching_quality),
            finishing_quality: Set(request.finishing_quality),
            measurement_accuracy: Set(request.measurement_accuracy),
            design_adherence: Set(request.design_adherence),
            overall_quality: Set(request.overall_quality),
            passed: Set(passed),
            defects: Set(serde_json::json!(request.defects)),
            corrective_actions: Set(request.corrective_actions),
            notes: Set(request.notes),
            created_at: Set(now),
        };
        let check_model = check.insert(&txn).await?;

        let note = if passed {
            "Quality check passed".to_string()
        } else {
            "Quality check failed, sent back for rework".to_string()
        };
        apply_order_transition(
            &txn,
            order,
            WorkflowEvent::QualityCheck { passed },
            actor,
            Some(note),
            |_| {},
        )
        .await?;

        if let Some(tailor_id) = assignment.map(|a| a.tailor_id) {
            let score = request.overall_quality.score();
            self.fold_tailor_rating(&txn, tailor_id, score).await?;
            upsert_monthly_performance(
                &txn,
                tailor_id,
                PerformanceDelta {
                    checks_passed: passed as i32,
                    checks_failed: !passed as i32,
                    rating: Some(score),
                    ..Default::default()
                },
            )
            .await?;
        }

        txn.commit().await?;

        info!(check_id = %check_id, order_id = %order_id, passed, "Quality check recorded");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::QualityCheckRecorded { order_id, passed })
                .await
            {
                warn!(error = %e, order_id = %order_id, "Failed to send quality check event");
            }
        }

        Ok(check_model)
    }

    /// Folds one grade into the tailor's running mean rating.
    async fn fold_tailor_rating<C>(
        &self,
        conn: &C,
        tailor_id: Uuid,
        score: i32,
    ) -> Result<(), ServiceError>
    where
        C: sea_orm::ConnectionTrait,
    {
        let tailor = TailorEntity::find_by_id(tailor_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Tailor not found".to_string()))?;

        let count = tailor.quality_checks_count;
        let folded = tailor.quality_rating * Decimal::from(count) + Decimal::from(score);
        let new_rating = (folded / Decimal::from(count + 1)).round_dp(2);

        let mut active_model: TailorActiveModel = tailor.into();
        active_model.quality_rating = Set(new_rating);
        active_model.quality_checks_count = Set(count + 1);
        active_model.updated_at = Set(Some(Utc::now()));
        active_model.update(conn).await?;
        Ok(())
    }

    /// Inspection audit trail for an order, oldest first.
    #[instrument(skip(self))]
    pub async fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<QualityCheckResponse>, ServiceError> {
        let checks = QualityCheckEntity::find()
            .filter(quality_check::Column::OrderId.eq(order_id))
            .order_by_asc(quality_check::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OverallQuality::Good, 3, 3, true; "both floors met")]
    #[test_case(OverallQuality::Excellent, 5, 5, true; "top marks")]
    #[test_case(OverallQuality::Good, 2, 5, false; "stitching below floor")]
    #[test_case(OverallQuality::Good, 5, 2, false; "finishing below floor")]
    #[test_case(OverallQuality::Rejected, 5, 5, false; "rejected overrides ratings")]
    #[test_case(OverallQuality::NeedsImprovement, 3, 3, true; "needs improvement still passes floors")]
    #[test_case(OverallQuality::Satisfactory, 2, 2, false; "both below floor")]
    fn pass_rule(overall: OverallQuality, stitching: i32, finishing: i32, expected: bool) {
        assert_eq!(evaluate(overall, stitching, finishing), expected);
    }
}
