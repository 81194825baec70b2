mod common;

use assert_matches::assert_matches;
use regex::Regex;
use rust_decimal_macros::dec;

use atelier_api::errors::ServiceError;
use atelier_api::models::{MeasurementUnit, OrderPriority, OrderType};
use atelier_api::services::customers::{CreateCustomerRequest, UpdateCustomerRequest};
use atelier_api::services::measurements::MeasurementsInput;
use atelier_api::services::stores::CreateStoreRequest;

use common::TestApp;

#[tokio::test]
async fn generated_codes_follow_their_formats() {
    let app = TestApp::new().await;

    let store = app.seed_store("KCH").await;
    let customer = app.seed_customer("Areeba Noor", "0301112233").await;
    let tailor = app.seed_tailor("Junaid", 5).await;
    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(2000),
        )
        .await;

    let customer_code = Regex::new(r"^CUST-\d{4}-\d{5}$").unwrap();
    let tailor_code = Regex::new(r"^TLR\d{4}$").unwrap();
    let order_number = Regex::new(r"^ORD-KCH-\d{8}-\d{3}$").unwrap();

    assert!(customer_code.is_match(&customer.customer_code));
    assert!(tailor_code.is_match(&tailor.tailor_code));
    assert!(order_number.is_match(&order.order_number));
}

#[tokio::test]
async fn customers_are_found_by_code_and_search() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Maryam Aslam", "0304445566").await;

    let by_code = app
        .services
        .customers
        .get_customer_by_code(&customer.customer_code)
        .await
        .unwrap();
    assert_eq!(by_code.id, customer.id);

    let by_name = app
        .services
        .customers
        .search_customers("Maryam")
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, customer.id);

    let by_phone = app
        .services
        .customers
        .search_customers("0304445566")
        .await
        .unwrap();
    assert_eq!(by_phone.len(), 1);

    let none = app
        .services
        .customers
        .search_customers("no-such-person")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_ignores_case() {
    let app = TestApp::new().await;

    let store = app.seed_store("KCH").await;
    let customer = app.seed_customer("Maryam Aslam", "0304445566").await;
    let order = app
        .seed_order(
            customer.id,
            store.id,
            OrderType::NewStitching,
            OrderPriority::Medium,
            dec!(1200),
        )
        .await;

    let lowered = app
        .services
        .customers
        .search_customers("maryam")
        .await
        .unwrap();
    assert_eq!(lowered.len(), 1);
    assert_eq!(lowered[0].id, customer.id);

    let shouted = app
        .services
        .customers
        .search_customers("MARYAM")
        .await
        .unwrap();
    assert_eq!(shouted.len(), 1);

    // Order numbers are stored uppercase; a lowercase query still matches.
    let by_number = app.services.orders.search_orders("ord-kch").await.unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, order.id);
}

#[tokio::test]
async fn customer_updates_keep_the_code() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Hassan Raja", "0307778899").await;
    let original_code = customer.customer_code.clone();

    let updated = app
        .services
        .customers
        .update_customer(
            customer.id,
            UpdateCustomerRequest {
                phone: Some("0309990000".to_string()),
                city: Some("Karachi".to_string()),
                whatsapp_opt_in: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.customer_code, original_code);
    assert_eq!(updated.phone, "0309990000");
    assert_eq!(updated.city.as_deref(), Some("Karachi"));
    assert!(updated.whatsapp_opt_in);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn invalid_customer_input_is_rejected() {
    let app = TestApp::new().await;

    let err = app
        .services
        .customers
        .create_customer(CreateCustomerRequest {
            name: String::new(),
            phone: "1234567".to_string(),
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
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services
        .customers
        .create_customer(CreateCustomerRequest {
            name: "Short Phone".to_string(),
            phone: "12345".to_string(),
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
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn measurement_history_is_newest_first() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Rabia Anwar", "0302221144").await;

    let first = app
        .services
        .measurements
        .record_measurements(
            customer.id,
            MeasurementsInput {
                chest: Some(dec!(38)),
                waist: Some(dec!(32)),
                shirt_length: Some(dec!(29)),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(first.unit, MeasurementUnit::Cm);

    let second = app
        .services
        .measurements
        .record_measurements(
            customer.id,
            MeasurementsInput {
                unit: MeasurementUnit::Inches,
                chest: Some(dec!(39.5)),
                waist: Some(dec!(33)),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let latest = app
        .services
        .measurements
        .latest_for_customer(customer.id)
        .await
        .unwrap()
        .expect("latest measurement");
    assert_eq!(latest.id, second.id);
    assert_eq!(latest.chest, Some(dec!(39.5)));

    let history = app
        .services
        .measurements
        .history_for_customer(customer.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
}

#[tokio::test]
async fn measurement_update_replaces_the_record() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Faisal Javed", "0305556677").await;
    let recorded = app
        .services
        .measurements
        .record_measurements(
            customer.id,
            MeasurementsInput {
                chest: Some(dec!(40)),
                sleeve_length: Some(dec!(24)),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let updated = app
        .services
        .measurements
        .update_measurements(
            recorded.id,
            MeasurementsInput {
                chest: Some(dec!(41)),
                trouser_waist: Some(dec!(34)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, recorded.id);
    assert_eq!(updated.chest, Some(dec!(41)));
    assert_eq!(updated.trouser_waist, Some(dec!(34)));
    // Full-record replace: fields absent from the input are cleared.
    assert_eq!(updated.sleeve_length, None);
    assert_eq!(updated.created_at, recorded.created_at);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn empty_or_negative_measurements_are_rejected() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Komal Shahid", "0308887755").await;

    let err = app
        .services
        .measurements
        .record_measurements(customer.id, MeasurementsInput::default(), None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services
        .measurements
        .record_measurements(
            customer.id,
            MeasurementsInput {
                chest: Some(dec!(-5)),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn store_codes_are_uppercased_and_unique() {
    let app = TestApp::new().await;

    let store = app
        .services
        .stores
        .create_store(CreateStoreRequest {
            code: "khi".to_string(),
            name: "Karachi Branch".to_string(),
            address: None,
            phone: None,
            manager_id: None,
        })
        .await
        .unwrap();
    assert_eq!(store.code, "KHI");

    let err = app
        .services
        .stores
        .create_store(CreateStoreRequest {
            code: "KHI".to_string(),
            name: "Duplicate".to_string(),
            address: None,
            phone: None,
            manager_id: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidOperation(_));

    let err = app
        .services
        .stores
        .create_store(CreateStoreRequest {
            code: "K1".to_string(),
            name: "Digits".to_string(),
            address: None,
            phone: None,
            manager_id: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn deactivated_stores_leave_the_active_list() {
    let app = TestApp::new().await;

    let keep = app.seed_store("LHE").await;
    let drop = app.seed_store("SKT").await;

    app.services.stores.deactivate_store(drop.id).await.unwrap();

    let active = app.services.stores.list_active_stores().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, keep.id);

    // Deactivated stores remain fetchable for order history.
    let fetched = app.services.stores.get_store(drop.id).await.unwrap();
    assert!(!fetched.is_active);
}
