//! Delivery date estimation.
//!
//! Pure calendar arithmetic over an injected "now": base lead time per
//! order type, scaled by a priority multiplier and rounded up to whole
//! days. No business-day or holiday awareness.

use chrono::{DateTime, Duration, Utc};

use crate::models::{OrderPriority, OrderType};

/// Fallback lead time for order types added in the future.
pub const DEFAULT_LEAD_DAYS: i64 = 7;

pub fn base_lead_days(order_type: OrderType) -> i64 {
    match order_type {
        OrderType::Alterations => 3,
        OrderType::NewStitching => 14,
    }
}

pub fn priority_multiplier(priority: OrderPriority) -> f64 {
    match priority {
        OrderPriority::Urgent => 0.5,
        OrderPriority::High => 0.7,
        OrderPriority::Medium => 1.0,
        OrderPriority::Low => 1.5,
    }
}

/// Lead time in whole days for the given type and priority, rounded up.
pub fn adjusted_lead_days(order_type: OrderType, priority: OrderPriority) -> i64 {
    let days = base_lead_days(order_type) as f64 * priority_multiplier(priority);
    days.ceil() as i64
}

/// Expected delivery date: `now + ceil(base(type) * multiplier(priority))`
/// days.
pub fn calculate_delivery_date(
    order_type: OrderType,
    priority: OrderPriority,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    now + Duration::days(adjusted_lead_days(order_type, priority))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case(OrderType::NewStitching, OrderPriority::Urgent, 7; "urgent stitching halves and rounds up")]
    #[test_case(OrderType::NewStitching, OrderPriority::High, 10; "high stitching")]
    #[test_case(OrderType::NewStitching, OrderPriority::Medium, 14; "medium stitching unchanged")]
    #[test_case(OrderType::NewStitching, OrderPriority::Low, 21; "low stitching")]
    #[test_case(OrderType::Alterations, OrderPriority::Urgent, 2; "urgent alterations")]
    #[test_case(OrderType::Alterations, OrderPriority::High, 3; "high alterations rounds up from 2.1")]
    #[test_case(OrderType::Alterations, OrderPriority::Medium, 3; "medium alterations unchanged")]
    #[test_case(OrderType::Alterations, OrderPriority::Low, 5; "low alterations rounds up from 4.5")]
    fn adjusted_lead_day_table(order_type: OrderType, priority: OrderPriority, expected: i64) {
        assert_eq!(adjusted_lead_days(order_type, priority), expected);
    }

    #[test]
    fn delivery_date_is_pure_over_injected_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 17, 10, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 1, 27, 10, 30, 0).unwrap();
        assert_eq!(
            calculate_delivery_date(OrderType::NewStitching, OrderPriority::High, now),
            expected
        );
        // Same inputs, same output.
        assert_eq!(
            calculate_delivery_date(OrderType::NewStitching, OrderPriority::High, now),
            expected
        );
    }
}
