mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use atelier_api::entities::tailor_performance;
use atelier_api::errors::ServiceError;
use atelier_api::models::{
    AssignmentStatus, OrderPriority, OrderStatus, OrderType, OverallQuality, WorkflowStage,
};
use atelier_api::services::assignments::AssignOrderRequest;
use atelier_api::services::quality_checks::QualityCheckRequest;

use common::TestApp;

#[tokio::test]
async fn capacity_is_enforced_at_assignment() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("KCH").await;
    let customer = app.seed_customer("Nadia Iqbal", "0301234567").await;
    let tailor = app.seed_tailor("Rashid", 1).await;

    let order_a = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(2000),
        )
        .await;
    let order_b = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::Alterations,
            OrderPriority::Medium,
            dec!(600),
        )
        .await;

    app.services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order_a.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();

    let tailor_row = app.services.tailors.get_tailor(tailor.id).await.unwrap();
    assert_eq!(tailor_row.current_order_count, 1);

    let err = app
        .services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order_b.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::CapacityExceeded(_));
}

#[tokio::test]
async fn unavailable_tailors_reject_assignments() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("LHE").await;
    let customer = app.seed_customer("Omar Farooq", "0335551234").await;
    let tailor = app.seed_tailor("Kamran", 5).await;

    app.services
        .tailors
        .set_availability(tailor.id, false)
        .await
        .unwrap();

    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(1500),
        )
        .await;

    let err = app
        .services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidOperation(_));

    // Unavailable tailors also drop out of the candidate list.
    let available = app.services.tailors.get_available_tailors().await.unwrap();
    assert!(available.iter().all(|t| t.id != tailor.id));
}

#[tokio::test]
async fn available_tailors_are_ordered_by_load() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("ISL").await;
    let customer = app.seed_customer("Zara Hussain", "0345678901").await;
    let busy = app.seed_tailor("Busy", 5).await;
    let idle = app.seed_tailor("Idle", 5).await;

    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(2500),
        )
        .await;
    app.services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order.id,
                tailor_id: busy.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();

    let available = app.services.tailors.get_available_tailors().await.unwrap();
    assert_eq!(available.len(), 2);
    assert_eq!(available[0].id, idle.id);
    assert_eq!(available[1].id, busy.id);
}

#[tokio::test]
async fn completing_an_assignment_updates_counters() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("KHI").await;
    let customer = app.seed_customer("Yusuf Ali", "0302223344").await;
    let tailor = app.seed_tailor("Mehwish", 3).await;

    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(4000),
        )
        .await;

    let assignment = app
        .services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Assigned);

    let started = app
        .services
        .assignments
        .start_assignment(assignment.id, &actor)
        .await
        .unwrap();
    assert_eq!(started.status, AssignmentStatus::InProgress);
    assert!(started.started_at.is_some());

    // Starting twice is rejected.
    let err = app
        .services
        .assignments
        .start_assignment(assignment.id, &actor)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidOperation(_));

    let completed = app
        .services
        .assignments
        .complete_assignment(assignment.id, &actor)
        .await
        .unwrap();
    assert_eq!(completed.status, AssignmentStatus::Completed);
    assert!(completed.completed_at.is_some());

    let tailor_row = app.services.tailors.get_tailor(tailor.id).await.unwrap();
    assert_eq!(tailor_row.current_order_count, 0);
    assert_eq!(tailor_row.total_orders_completed, 1);

    let active = app
        .services
        .assignments
        .active_for_tailor(tailor.id)
        .await
        .unwrap();
    assert!(active.is_empty());

    let err = app
        .services
        .assignments
        .complete_assignment(assignment.id, &actor)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidOperation(_));
}

#[tokio::test]
async fn failed_check_loops_through_rework_to_approval() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("MUL").await;
    let customer = app.seed_customer("Saad Sheikh", "0317778899").await;
    let tailor = app.seed_tailor("Naveed", 5).await;

    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(6000),
        )
        .await;

    let first = app
        .services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();
    app.services
        .assignments
        .complete_assignment(first.id, &actor)
        .await
        .unwrap();

    let failed = app
        .services
        .quality_checks
        .perform_quality_check(
            QualityCheckRequest {
                order_id: order.id,
                stitching_quality: 2,
                finishing_quality: 4,
                measurement_accuracy: 4,
                design_adherence: 4,
                overall_quality: OverallQuality::NeedsImprovement,
                defects: vec!["loose seam on left sleeve".to_string()],
                corrective_actions: Some("Restitch the sleeve seam".to_string()),
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();
    assert!(!failed.passed);

    let order_row = app.services.orders.get_order(order.id).await.unwrap();
    assert_eq!(order_row.status, OrderStatus::InProgress);
    assert_eq!(order_row.workflow_stage, Some(WorkflowStage::QualityCheck));

    // Rework: assign again, redo the stitching, pass the re-check.
    let second = app
        .services
        .assignments
        .assign_order(
            AssignOrderRequest {
                order_id: order.id,
                tailor_id: tailor.id,
                estimated_completion_time: None,
                notes: Some("Rework after failed check".to_string()),
            },
            &actor,
        )
        .await
        .unwrap();
    app.services
        .assignments
        .complete_assignment(second.id, &actor)
        .await
        .unwrap();

    let passed = app
        .services
        .quality_checks
        .perform_quality_check(
            QualityCheckRequest {
                order_id: order.id,
                stitching_quality: 4,
                finishing_quality: 4,
                measurement_accuracy: 4,
                design_adherence: 4,
                overall_quality: OverallQuality::Good,
                defects: vec![],
                corrective_actions: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap();
    assert!(passed.passed);

    let order_row = app.services.orders.get_order(order.id).await.unwrap();
    assert_eq!(order_row.status, OrderStatus::Ready);
    assert_eq!(order_row.workflow_stage, Some(WorkflowStage::Approved));

    let assignments = app
        .services
        .assignments
        .list_for_order(order.id)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 2);

    let checks = app
        .services
        .quality_checks
        .list_for_order(order.id)
        .await
        .unwrap();
    assert_eq!(checks.len(), 2);
    assert!(!checks[0].passed);
    assert!(checks[1].passed);

    // needs_improvement (2) then good (4) fold to a 3.00 running mean.
    let tailor_row = app.services.tailors.get_tailor(tailor.id).await.unwrap();
    assert_eq!(tailor_row.quality_rating, dec!(3.00));
    assert_eq!(tailor_row.total_orders_completed, 2);

    let performance = tailor_performance::Entity::find()
        .filter(tailor_performance::Column::TailorId.eq(tailor.id))
        .one(&*app.db)
        .await
        .unwrap()
        .expect("monthly performance row");
    assert_eq!(performance.orders_completed, 2);
    assert_eq!(performance.checks_passed, 1);
    assert_eq!(performance.checks_failed, 1);
    assert_eq!(performance.average_rating, dec!(3.00));
}

#[tokio::test]
async fn ratings_outside_range_are_rejected() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("PEW").await;
    let customer = app.seed_customer("Tania Raza", "0309998877").await;
    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::Alterations,
            OrderPriority::Medium,
            dec!(700),
        )
        .await;

    let err = app
        .services
        .quality_checks
        .perform_quality_check(
            QualityCheckRequest {
                order_id: order.id,
                stitching_quality: 6,
                finishing_quality: 4,
                measurement_accuracy: 4,
                design_adherence: 4,
                overall_quality: OverallQuality::Good,
                defects: vec![],
                corrective_actions: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn checks_require_finished_stitching() {
    let app = TestApp::new().await;
    let actor = app.actor();

    let store = app.seed_store("QTA").await;
    let customer = app.seed_customer("Danish Mir", "0316665544").await;
    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(3500),
        )
        .await;

    let err = app
        .services
        .quality_checks
        .perform_quality_check(
            QualityCheckRequest {
                order_id: order.id,
                stitching_quality: 4,
                finishing_quality: 4,
                measurement_accuracy: 4,
                design_adherence: 4,
                overall_quality: OverallQuality::Good,
                defects: vec![],
                corrective_actions: None,
                notes: None,
            },
            &actor,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidTransition(_));
}
