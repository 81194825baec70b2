//! Human-readable identifier generation.
//!
//! Formatting is split from uniqueness checking: the `format_*` functions
//! are deterministic given their inputs, while [`IdGenerator`] draws random
//! candidates and re-checks the store until it finds a free code. Every
//! retry loop is bounded; exhausting it surfaces
//! [`ServiceError::IdSpaceExhausted`] instead of spinning forever.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::db::DbPool;
use crate::entities::{customer, order, tailor};
use crate::errors::ServiceError;

/// Upper bound on random draws before a generator gives up.
pub const MAX_ATTEMPTS: u32 = 32;

/// `CUST-<year>-<5-digit suffix>`, e.g. `CUST-2025-00042`.
pub fn format_customer_code(year: i32, n: u32) -> String {
    format!("CUST-{}-{:05}", year, n % 100_000)
}

/// `ORD-<store code>-<YYYYMMDD>-<3-digit suffix>`, e.g.
/// `ORD-KCH-20250117-007`.
pub fn format_order_number(store_code: &str, date: NaiveDate, n: u32) -> String {
    format!(
        "ORD-{}-{}-{:03}",
        store_code.to_uppercase(),
        date.format("%Y%m%d"),
        n % 1_000
    )
}

/// `TLR<4-digit suffix>`, e.g. `TLR0042`.
pub fn format_tailor_code(n: u32) -> String {
    format!("TLR{:04}", n % 10_000)
}

/// Store-checked generator for customer, order, and tailor codes.
///
/// Generation is candidate-then-recheck: a code is only returned when no
/// row with that exact code exists at query time. Two concurrent callers
/// can still race between check and insert; the unique index on each code
/// column is the final arbiter and surfaces the loser as a database error.
#[derive(Clone)]
pub struct IdGenerator {
    db: Arc<DbPool>,
}

impl IdGenerator {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Generates a customer code unused at call time.
    #[instrument(skip(self))]
    pub async fn customer_code(&self) -> Result<String, ServiceError> {
        let year = Utc::now().year();
        for attempt in 0..MAX_ATTEMPTS {
            let n: u32 = {
                let mut rng = rand::thread_rng();
                rng.gen_range(0..100_000)
            };
            let candidate = format_customer_code(year, n);
            let taken = customer::Entity::find()
                .filter(customer::Column::CustomerCode.eq(&candidate))
                .count(&*self.db)
                .await?
                > 0;
            if !taken {
                return Ok(candidate);
            }
            debug!(candidate, attempt, "Customer code collision, retrying");
        }
        Err(ServiceError::IdSpaceExhausted(format!(
            "no free customer code after {MAX_ATTEMPTS} attempts"
        )))
    }

    /// Generates an order number for the given store, unused at call time.
    #[instrument(skip(self))]
    pub async fn order_number(&self, store_code: &str) -> Result<String, ServiceError> {
        let today = Utc::now().date_naive();
        for attempt in 0..MAX_ATTEMPTS {
            let n: u32 = {
                let mut rng = rand::thread_rng();
                rng.gen_range(0..1_000)
            };
            let candidate = format_order_number(store_code, today, n);
            let taken = order::Entity::find()
                .filter(order::Column::OrderNumber.eq(&candidate))
                .count(&*self.db)
                .await?
                > 0;
            if !taken {
                return Ok(candidate);
            }
            debug!(candidate, attempt, "Order number collision, retrying");
        }
        Err(ServiceError::IdSpaceExhausted(format!(
            "no free order number for store {store_code} after {MAX_ATTEMPTS} attempts"
        )))
    }

    /// Generates a tailor code unused at call time.
    #[instrument(skip(self))]
    pub async fn tailor_code(&self) -> Result<String, ServiceError> {
        for attempt in 0..MAX_ATTEMPTS {
            let n: u32 = {
                let mut rng = rand::thread_rng();
                rng.gen_range(0..10_000)
            };
            let candidate = format_tailor_code(n);
            let taken = tailor::Entity::find()
                .filter(tailor::Column::TailorCode.eq(&candidate))
                .count(&*self.db)
                .await?
                > 0;
            if !taken {
                return Ok(candidate);
            }
            debug!(candidate, attempt, "Tailor code collision, retrying");
        }
        Err(ServiceError::IdSpaceExhausted(format!(
            "no free tailor code after {MAX_ATTEMPTS} attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn customer_code_format() {
        assert_eq!(format_customer_code(2025, 42), "CUST-2025-00042");
        assert_eq!(format_customer_code(2025, 99_999), "CUST-2025-99999");
        // Suffix wraps into range rather than widening the field.
        assert_eq!(format_customer_code(2025, 100_001), "CUST-2025-00001");

        let re = Regex::new(r"^CUST-\d{4}-\d{5}$").unwrap();
        for n in [0, 7, 312, 99_999] {
            assert!(re.is_match(&format_customer_code(2026, n)));
        }
    }

    #[test]
    fn order_number_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        assert_eq!(format_order_number("KCH", date, 7), "ORD-KCH-20250117-007");
        assert_eq!(
            format_order_number("kch", date, 999),
            "ORD-KCH-20250117-999"
        );

        let re = Regex::new(r"^ORD-[A-Z]+-\d{8}-\d{3}$").unwrap();
        assert!(re.is_match(&format_order_number("BLR", date, 0)));
    }

    #[test]
    fn tailor_code_format() {
        assert_eq!(format_tailor_code(42), "TLR0042");
        assert_eq!(format_tailor_code(9_999), "TLR9999");

        let re = Regex::new(r"^TLR\d{4}$").unwrap();
        for n in [0, 1, 500, 9_999] {
            assert!(re.is_match(&format_tailor_code(n)));
        }
    }
}
