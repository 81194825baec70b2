//! Atelier API Library
//!
//! Core services for a tailoring-shop order management system: customer
//! records, orders with a dual status/workflow-stage lifecycle, measurement
//! snapshots, tailor assignment, and quality control, persisted through
//! SeaORM against a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod delivery;
pub mod entities;
pub mod errors;
pub mod events;
pub mod ids;
pub mod migrator;
pub mod models;
pub mod services;
pub mod workflow;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Shared application state handed to any embedding layer (HTTP, CLI, jobs).
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: services::AppServices,
}

/// Uniform success/failure envelope returned across the service boundary.
///
/// Service functions themselves return `Result<_, ServiceError>`; this
/// wrapper is the serialized form consumed by UI callers.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, errors::ServiceError>> for ApiResponse<T> {
    fn from(result: Result<T, errors::ServiceError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

/// Paginated list wrapper shared by the list endpoints.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use crate::errors::ServiceError;

    #[test]
    fn success_envelope_carries_data() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.data, Some(42));
        assert!(response.error.is_none());
    }

    #[test]
    fn error_envelope_carries_message() {
        let response = ApiResponse::<()>::error("boom");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("boom"));
    }

    #[test]
    fn result_conversion_maps_not_found() {
        let result: Result<i32, ServiceError> =
            Err(ServiceError::NotFound("Order not found".into()));
        let response = ApiResponse::from(result);
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Not found: Order not found")
        );
    }
}
