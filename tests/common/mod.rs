//! Shared fixture for integration tests: an in-memory SQLite database with
//! the full schema applied, plus seed helpers for the reference data most
//! scenarios need.

#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use uuid::Uuid;

use atelier_api::db::DbPool;
use atelier_api::migrator::Migrator;
use atelier_api::models::{OrderPriority, OrderType, SkillLevel};
use atelier_api::services::customers::{CreateCustomerRequest, CustomerResponse};
use atelier_api::services::orders::{CreateOrderRequest, OrderResponse};
use atelier_api::services::stores::{CreateStoreRequest, StoreResponse};
use atelier_api::services::tailors::{OnboardTailorRequest, TailorResponse};
use atelier_api::services::{Actor, AppServices};
use sea_orm_migration::MigratorTrait;

pub struct TestApp {
    pub db: Arc<DbPool>,
    pub services: AppServices,
}

impl TestApp {
    /// Fresh in-memory database with the schema applied. The pool is
    /// pinned to one connection so every query sees the same SQLite
    /// instance.
    pub async fn new() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        let db = Arc::new(db);
        let services = AppServices::build(db.clone(), None);
        Self { db, services }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(Uuid::new_v4(), "Test Manager")
    }

    pub async fn seed_store(&self, code: &str) -> StoreResponse {
        self.services
            .stores
            .create_store(CreateStoreRequest {
                code: code.to_string(),
                name: format!("{code} Branch"),
                address: Some("12 Tailor Street".to_string()),
                phone: Some("0123456789".to_string()),
                manager_id: None,
            })
            .await
            .expect("seed store")
    }

    pub async fn seed_customer(&self, name: &str, phone: &str) -> CustomerResponse {
        self.services
            .customers
            .create_customer(CreateCustomerRequest {
                name: name.to_string(),
                phone: phone.to_string(),
                email: None,
                address: None,
                city: None,
                postal_code: None,
                whatsapp_opt_in: false,
                sms_opt_in: false,
                email_opt_in: false,
                notes: None,
            })
            .await
            .expect("seed customer")
    }

    pub async fn seed_tailor(&self, name: &str, max_concurrent: i32) -> TailorResponse {
        self.services
            .tailors
            .onboard_tailor(OnboardTailorRequest {
                user_id: None,
                name: name.to_string(),
                email: None,
                phone: None,
                specializations: vec!["shirts".to_string()],
                skill_level: SkillLevel::Expert,
                hourly_rate: None,
                max_concurrent_orders: Some(max_concurrent),
            })
            .await
            .expect("seed tailor")
    }

    pub async fn seed_order(
        &self,
        customer_id: Uuid,
        store_id: Uuid,
        order_type: OrderType,
        priority: OrderPriority,
        total: Decimal,
    ) -> OrderResponse {
        self.services
            .orders
            .create_order(
                CreateOrderRequest {
                    customer_id,
                    store_id,
                    order_type,
                    priority,
                    garment_type: "shirt".to_string(),
                    fabric_details: None,
                    special_instructions: None,
                    measurement_id: None,
                    total_amount: total,
                    advance_paid: Decimal::ZERO,
                    expected_delivery_date: None,
                    fitting_date: None,
                },
                &self.actor(),
            )
            .await
            .expect("seed order")
    }
}
