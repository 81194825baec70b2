//! Thin service objects over the store.
//!
//! Each service validates its request DTO before touching the database,
//! wraps every multi-step mutation in one transaction, and emits a domain
//! event on success. Mutating operations take an explicit [`Actor`] instead
//! of consulting any ambient session state.

pub mod assignments;
pub mod customers;
pub mod measurements;
pub mod orders;
pub mod quality_checks;
pub mod stores;
pub mod tailors;

use std::sync::Arc;

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::ColumnTrait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::ids::IdGenerator;

/// Case-insensitive substring match: lowers both the column and the needle
/// so `LIKE` behaves the same on Postgres as it does on SQLite.
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", needle.to_lowercase());
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

/// Identity of the staff member performing an operation, recorded on audit
/// rows (status history, assignments, quality checks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub display_name: String,
}

impl Actor {
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

/// All services wired against one connection pool.
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<customers::CustomerService>,
    pub stores: Arc<stores::StoreService>,
    pub measurements: Arc<measurements::MeasurementService>,
    pub orders: Arc<orders::OrderService>,
    pub tailors: Arc<tailors::TailorService>,
    pub assignments: Arc<assignments::AssignmentService>,
    pub quality_checks: Arc<quality_checks::QualityCheckService>,
}

impl AppServices {
    pub fn build(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        let ids = IdGenerator::new(db.clone());
        Self {
            customers: Arc::new(customers::CustomerService::new(
                db.clone(),
                ids.clone(),
                event_sender.clone(),
            )),
            stores: Arc::new(stores::StoreService::new(db.clone())),
            measurements: Arc::new(measurements::MeasurementService::new(db.clone())),
            orders: Arc::new(orders::OrderService::new(
                db.clone(),
                ids.clone(),
                event_sender.clone(),
            )),
            tailors: Arc::new(tailors::TailorService::new(
                db.clone(),
                ids,
                event_sender.clone(),
            )),
            assignments: Arc::new(assignments::AssignmentService::new(
                db.clone(),
                event_sender.clone(),
            )),
            quality_checks: Arc::new(quality_checks::QualityCheckService::new(db, event_sender)),
        }
    }
}
