//! Domain value types shared between entities and services.
//!
//! Every enum is string-backed at the store layer so rows stay readable in
//! ad-hoc queries; the Rust side never handles raw status strings.

pub mod measurement;
pub mod order;
pub mod quality;
pub mod staffing;

pub use measurement::MeasurementUnit;
pub use order::{OrderPriority, OrderStatus, OrderType, WorkflowStage};
pub use quality::OverallQuality;
pub use staffing::{AssignmentStatus, SkillLevel, UserRole};
