//! HTTP-level integration tests for the listing workflow
//! (`GET /{customer_code}/list`).

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, get};
use sqlx::PgPool;
use uuid::Uuid;

use meterwise_db::models::NewReading;
use meterwise_db::repositories::{CustomerRepo, ReadingRepo};

async fn seed_reading(pool: &PgPool, customer_code: &str, measure_type: &str, month: u32) {
    CustomerRepo::ensure(pool, customer_code).await.unwrap();
    let measure_uuid = Uuid::new_v4();
    ReadingRepo::insert(
        pool,
        &NewReading {
            measure_uuid,
            customer_code: customer_code.to_string(),
            image_url: format!("http://localhost/images/{measure_uuid}.png"),
            measure_datetime: NaiveDate::from_ymd_opt(2024, month, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            measure_type: measure_type.to_string(),
            measure_value: 50.0,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_customer_returns_404(pool: PgPool) {
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/ghost/list").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "MEASURES_NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_customer_code_returns_400(pool: PgPool) {
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/%20%20/list").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "INVALID_DATA");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_filter_returns_400_invalid_type(pool: PgPool) {
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/321/list?measure_type=STEAM").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_code"], "INVALID_TYPE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lists_all_readings_with_projection(pool: PgPool) {
    seed_reading(&pool, "321", "WATER", 5).await;
    seed_reading(&pool, "321", "GAS", 5).await;
    seed_reading(&pool, "999", "WATER", 5).await;
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/321/list").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["customer_code"], "321");

    let measures = json["measures"].as_array().unwrap();
    assert_eq!(measures.len(), 2);
    for measure in measures {
        assert!(measure["measure_uuid"].is_string());
        assert!(measure["measure_datetime"].is_string());
        assert!(measure["measure_type"].is_string());
        assert!(measure["has_confirmed"].is_boolean());
        assert!(measure["image_url"].is_string());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn filter_is_case_insensitive(pool: PgPool) {
    seed_reading(&pool, "321", "WATER", 5).await;
    seed_reading(&pool, "321", "GAS", 5).await;
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/321/list?measure_type=gas").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let measures = json["measures"].as_array().unwrap();
    assert_eq!(measures.len(), 1);
    assert_eq!(measures[0]["measure_type"], "GAS");
}

/// A filter that matches nothing is a 404 even when the customer has
/// readings of the other type.
#[sqlx::test(migrations = "../db/migrations")]
async fn filter_with_no_matches_returns_404(pool: PgPool) {
    seed_reading(&pool, "321", "WATER", 5).await;
    let (app, _storage) = common::default_test_app(pool);

    let response = get(app, "/321/list?measure_type=GAS").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_code"], "MEASURES_NOT_FOUND");
}
