//! SeaORM entity definitions, one module per table.
//!
//! Table names carry the `oms_` prefix used by the hosted store so the same
//! schema can coexist with other applications in one database.

pub mod customer;
pub mod customer_measurement;
pub mod order;
pub mod order_assignment;
pub mod order_status_history;
pub mod quality_check;
pub mod store;
pub mod tailor;
pub mod tailor_performance;
pub mod user;
